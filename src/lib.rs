#![cfg(target_arch = "wasm32")]
use crate::core::background::shade;
use crate::core::color::format_hex;
use crate::core::controls;
use crate::core::scroll::ScrollStore;
use crate::core::SceneParams;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod core;
mod dom;
mod events;
mod frame;
mod panel;
mod render;
mod scroll;

static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lucy-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::wrap(Box::new(launch) as Box<dyn FnMut()>);
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        launch();
    }
    Ok(())
}

fn launch() {
    if STARTED.swap(true, Ordering::SeqCst) {
        return;
    }
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
}

/// Paint the page with the background's centre colour until the first frame.
fn paint_backdrop(document: &web::Document, scene: &render::SceneState, params: &SceneParams) {
    let c = shade(Vec2::splat(0.5), &scene.shader_frame(), &params.background);
    if let Some(body) = document.body() {
        _ = body
            .style()
            .set_property("background-color", &format_hex(c.to_array()));
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let app = document
        .get_element_by_id("app")
        .ok_or_else(|| anyhow::anyhow!("missing #app"))?;
    let canvas = dom::create_canvas(&document, &app)?;
    dom::sync_canvas_backing_size(&canvas);

    let (width, height) = dom::viewport_size();
    let params = Rc::new(RefCell::new(SceneParams::default()));
    let scene: Rc<RefCell<render::SceneState>> =
        Rc::new(RefCell::new(render::SceneState::new(width, height)));
    paint_backdrop(&document, &scene.borrow(), &params.borrow());

    let scroll_store = Rc::new(ScrollStore::default());
    scroll::wire_smooth_scroll(scroll_store.clone())?;

    let panel = panel::Panel::create(&document, params.clone())?;
    panel.add_section(controls::spot_light_section())?;
    panel.add_section(controls::background_section())?;

    let gpu = Rc::new(RefCell::new(frame::init_gpu(&canvas, &scene).await?));

    assets::load_textures(gpu.clone());
    assets::load_mesh(assets::MeshWiring {
        gpu: gpu.clone(),
        scene: scene.clone(),
        params: params.clone(),
        panel,
    });

    events::wire_resize(canvas.clone(), scene.clone());
    events::wire_pointer_move(scene.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        params,
        scroll: scroll_store,
        gpu,
        canvas,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    log::info!("scene running {}x{}", width, height);
    Ok(())
}
