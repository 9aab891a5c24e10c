use crate::{audio, render};
use glam::Vec2;
use instant::Instant;
use jukebox_core::{FrameInput, SceneEvent, SceneState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the animation callback needs, owned in one place and mutated
/// only from the frame tick.
pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<SceneState>>,
    pub pointer_ndc: Rc<RefCell<Option<Vec2>>>,

    pub canvas: web::HtmlCanvasElement,
    pub gain: web::GainNode,
    pub analyser: Option<web::AnalyserNode>,
    pub analyser_buf: Vec<u8>,

    pub gpu: Option<render::GpuState<'a>>,
    pub events: Vec<SceneEvent>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        let input = FrameInput {
            pointer_ndc: *self.pointer_ndc.borrow(),
            avg_loudness: audio::average_loudness(&self.analyser, &mut self.analyser_buf),
        };

        let (exposure, bloom_strength, volume) = {
            let mut scene = self.scene.borrow_mut();
            scene.camera.aspect =
                self.canvas.width().max(1) as f32 / self.canvas.height().max(1) as f32;
            scene.advance(dt, &input, &mut self.events);
            (scene.exposure(), scene.bloom_strength, scene.volume)
        };

        for ev in self.events.drain(..) {
            if let SceneEvent::Factor { factor } = ev {
                log::debug!("[flicker] factor {factor:.4}");
            }
        }

        self.gain.gain().set_value(volume);

        if let Some(g) = &mut self.gpu {
            g.set_visuals(exposure, bloom_strength);
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(dt_sec) {
                log::error!("render error: {e:?}");
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {e:?}");
            None
        }
    }
}

/// Drive the frame callback from requestAnimationFrame until the window
/// goes away; dropping frame requests is the only cancellation there is.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
