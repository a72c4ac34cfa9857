use std::cell::RefCell;
use std::rc::Rc;

use hero_core::scene::Scene;
use instant::Instant;
use web_sys as web;

use crate::input::PointerState;
use crate::render::GpuState;

/// Everything the per-frame callback needs. The callback must not block;
/// each tick is O(1) per label.
pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub gpu: Rc<RefCell<GpuState<'static>>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let pointer = self.pointer.borrow().ndc;
        let width = self.canvas.width();
        let height = self.canvas.height();

        let state = {
            let mut scene = self.scene.borrow_mut();
            if height > 0 {
                scene.set_aspect(width as f32 / height as f32);
            }
            scene.advance(pointer, dt_sec)
        };

        let mut gpu = self.gpu.borrow_mut();
        gpu.resize_if_needed(width, height);
        if let Err(e) = gpu.render(&self.scene.borrow(), &state) {
            log::error!("render error: {e:?}");
        }
    }
}
