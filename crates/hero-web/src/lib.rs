#![cfg(target_arch = "wasm32")]
//! Browser bootstrap for the hero scene: canvas wiring, asset fetches, and
//! the requestAnimationFrame loop. All scene logic lives in `hero-core`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hero_core::asset::decode_glb;
use hero_core::labels::LabelField;
use hero_core::model::RetryPolicy;
use hero_core::scene::Scene;
use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod fetch;
mod frame;
mod input;
mod render;
mod text;

const CANVAS_ID: &str = "hero-canvas";
const MODEL_URL: &str = "/model/meta_logo.glb";
const LABEL_FONT_URL: &str = "/fonts/raleway-regular.ttf";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {e:?}");
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    dom::wire_canvas_resize(&canvas);

    // Viewport class is read once here; only the camera distance depends on it.
    let compact = dom::is_compact_viewport();
    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let scene = Rc::new(RefCell::new(Scene::compose(
        aspect,
        compact,
        LabelField::default(),
        RetryPolicy::FailOpen,
    )));

    let pointer = Rc::new(RefCell::new(input::PointerState::default()));
    input::wire_pointermove(&canvas, pointer.clone());

    // Scopes the fetches to the page's lifetime: late results are discarded.
    let alive = Rc::new(Cell::new(true));
    wire_teardown(alive.clone());

    // Leak a canvas clone to satisfy the 'static surface lifetime.
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = Rc::new(RefCell::new(render::GpuState::new(leaked_canvas).await?));

    spawn_model_fetch(scene.clone(), gpu.clone(), alive.clone());
    spawn_font_fetch(scene.clone(), gpu.clone(), alive.clone());

    // Frame loop driven by requestAnimationFrame.
    let mut ctx = frame::FrameContext {
        scene,
        gpu,
        pointer,
        canvas,
        last_instant: Instant::now(),
    };
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
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
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }

    Ok(())
}

/// Fetch and decode the logo model, driving the slot's retry policy.
fn spawn_model_fetch(
    scene: Rc<RefCell<Scene>>,
    gpu: Rc<RefCell<render::GpuState<'static>>>,
    alive: Rc<Cell<bool>>,
) {
    spawn_local(async move {
        loop {
            match fetch::fetch_bytes(MODEL_URL).await {
                Ok(bytes) => {
                    if !alive.get() {
                        log::info!("[model] fetch finished after teardown, discarding");
                        return;
                    }
                    match decode_glb(&bytes) {
                        Ok(model) => {
                            let mut scene = scene.borrow_mut();
                            scene.model.resolve(model);
                            if let Some(model) = scene.model.model() {
                                gpu.borrow_mut().upload_model(model);
                            }
                            return;
                        }
                        Err(err) => {
                            if !scene.borrow_mut().model.fail(&err) {
                                return;
                            }
                        }
                    }
                }
                Err(err) => {
                    if !alive.get() || !scene.borrow_mut().model.fail(&err) {
                        return;
                    }
                }
            }
        }
    });
}

/// Fetch the label font and build the glyph atlas. Labels fail open: a
/// missing font leaves the scene without text, not broken.
fn spawn_font_fetch(
    scene: Rc<RefCell<Scene>>,
    gpu: Rc<RefCell<render::GpuState<'static>>>,
    alive: Rc<Cell<bool>>,
) {
    spawn_local(async move {
        match fetch::fetch_bytes(LABEL_FONT_URL).await {
            Ok(bytes) => {
                if !alive.get() {
                    return;
                }
                let labels = scene.borrow().labels.labels().to_vec();
                if let Err(e) = gpu.borrow_mut().install_labels(&bytes, &labels) {
                    log::warn!("[labels] atlas build failed, skipping labels: {e}");
                }
            }
            Err(e) => {
                log::warn!("[labels] font fetch failed, skipping labels: {e}");
            }
        }
    });
}

fn wire_teardown(alive: Rc<Cell<bool>>) {
    let closure = Closure::wrap(Box::new(move || {
        alive.set(false);
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
