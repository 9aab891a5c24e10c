use crate::{dom, storage};
use glam::Vec2;
use jukebox_core::{NavCursor, SceneState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

// Insertion order of the pickable controls in the target set.
pub const PREV_CONTROL: usize = 0;
pub const NEXT_CONTROL: usize = 1;

#[inline]
pub fn control_step(index: usize) -> Option<i32> {
    match index {
        PREV_CONTROL => Some(-1),
        NEXT_CONTROL => Some(1),
        _ => None,
    }
}

/// Everything the DOM handlers need, cloned into each closure.
#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SceneState>>,
    pub nav: Rc<RefCell<NavCursor>>,
    pub pointer_ndc: Rc<RefCell<Option<Vec2>>>,
    pub audio_ctx: web::AudioContext,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_click(&w);
    wire_keydown(&w);
    wire_resize(&w);
}

/// Client pixel position -> normalized device coordinates over the canvas.
#[inline]
pub fn client_to_ndc(canvas: &web::HtmlCanvasElement, client_x: f32, client_y: f32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    let x = (client_x - rect.left() as f32) / w * 2.0 - 1.0;
    let y = 1.0 - (client_y - rect.top() as f32) / h * 2.0;
    Vec2::new(x, y)
}

/// Advance the frame cursor, persist it, and kick off the presentation swap.
pub fn apply_move(nav: &Rc<RefCell<NavCursor>>, step: i32) {
    let current = nav.borrow_mut().step(step);
    storage::write_current(current);
    log::info!("[nav] move {step:+} -> frame {current}");

    // Restart the frame element's exit/enter transition; CSS owns the timing.
    if let Some(doc) = dom::window_document() {
        if let Some(el) = doc.get_element_by_id("jukebox-frame") {
            let _ = el.class_list().remove_1("swap");
            // Force a reflow so re-adding the class restarts the animation.
            if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
                let _ = html.offset_width();
            }
            let _ = el.set_attribute("data-index", &current.to_string());
            let _ = el.class_list().add_1("swap");
        }
    }
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = client_to_ndc(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        *w.pointer_ndc.borrow_mut() = Some(ndc);
        dom::set_body_cursor(w.scene.borrow().targets.hovered().is_some());
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        // Autoplay policy: the context may be suspended until a gesture.
        let _ = w.audio_ctx.resume();
        let hovered = w.scene.borrow().targets.hovered();
        if let Some(step) = hovered.and_then(control_step) {
            apply_move(&w.nav, step);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_keydown(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        match ev.key().as_str() {
            "ArrowLeft" => apply_move(&w.nav, -1),
            "ArrowRight" => apply_move(&w.nav, 1),
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_resize(w: &InputWiring) {
    let canvas = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
