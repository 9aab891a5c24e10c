use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{id} is not a canvas: {e:?}"))
}

#[inline]
pub fn media_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlMediaElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlMediaElement>()
        .map_err(|e| anyhow::anyhow!("#{id} is not a media element: {e:?}"))
}

/// Keep the canvas backing store at CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Reflect hover state in the cursor: grab-and-move over empty space,
/// pointer over a control.
pub fn set_body_cursor(hovering: bool) {
    if let Some(doc) = window_document() {
        if let Some(body) = doc.body() {
            let style = if hovering { "pointer" } else { "move" };
            let _ = body.style().set_property("cursor", style);
        }
    }
}
