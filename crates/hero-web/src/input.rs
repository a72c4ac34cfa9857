use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Normalized pointer position over the canvas, x right and y up, both
/// clamped to [-1, 1]. Owned by the rendering surface, read per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub ndc: Vec2,
}

pub fn wire_pointermove(canvas: &web::HtmlCanvasElement, state: Rc<RefCell<PointerState>>) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let x = (ev.client_x() as f64 - rect.left()) / rect.width() * 2.0 - 1.0;
        let y = 1.0 - (ev.client_y() as f64 - rect.top()) / rect.height() * 2.0;
        state.borrow_mut().ndc = Vec2::new(
            (x as f32).clamp(-1.0, 1.0),
            (y as f32).clamp(-1.0, 1.0),
        );
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
