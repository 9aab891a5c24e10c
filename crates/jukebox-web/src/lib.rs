#![cfg(target_arch = "wasm32")]
use glam::{Vec2, Vec3};
use instant::Instant;
use jukebox_core::{Camera, NavCursor, PickTarget, SceneState, TargetSet};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod dom;
mod events;
mod frame;
mod render;
mod storage;

// World-space layout of the clickable transport controls, flanking the
// projection wall below center. Insertion order must match
// events::{PREV_CONTROL, NEXT_CONTROL}.
const CONTROL_RADIUS: f32 = 1.2;
const PREV_CONTROL_POS: Vec3 = Vec3::new(-6.5, -5.0, 0.0);
const NEXT_CONTROL_POS: Vec3 = Vec3::new(6.5, -5.0, 0.0);
// Marquee text sits above the wall; decorative, never picked.
const MARQUEE_POS: Vec3 = Vec3::new(0.0, 8.0, 0.0);

fn build_targets() -> TargetSet {
    let mut marquee = PickTarget::new(MARQUEE_POS, 2.5);
    marquee.pickable = false;
    TargetSet::new(vec![
        PickTarget::new(PREV_CONTROL_POS, CONTROL_RADIUS),
        PickTarget::new(NEXT_CONTROL_POS, CONTROL_RADIUS),
        marquee,
    ])
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("jukebox-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {e:?}");
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::canvas_by_id(&document, "jukebox-canvas")?;
    dom::sync_canvas_backing_size(&canvas);

    // Resume where the visitor left off.
    let nav = Rc::new(RefCell::new(NavCursor::new(storage::read_current())));
    log::info!("[nav] starting at frame {}", nav.borrow().current());

    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let scene = Rc::new(RefCell::new(SceneState::new(
        Camera::jukebox(aspect),
        build_targets(),
        js_sys::Date::now() as u64,
    )));
    let pointer_ndc: Rc<RefCell<Option<Vec2>>> = Rc::new(RefCell::new(None));

    let media = dom::media_by_id(&document, "jukebox-audio")?;
    let graph = audio::build_graph(&media)?;
    // Playback may stay pending until the first gesture resumes the context.
    let _ = media.play();

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        nav: nav.clone(),
        pointer_ndc: pointer_ndc.clone(),
        audio_ctx: graph.ctx.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        pointer_ndc,
        canvas,
        gain: graph.gain,
        analyser: graph.analyser,
        analyser_buf: Vec::new(),
        gpu,
        events: Vec::new(),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
