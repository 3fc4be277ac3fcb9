use crate::dom;
use crate::render::SceneState;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Follow viewport resizes: canvas backing store, camera aspect and the
/// background plane. The surface itself is reconfigured by the next frame.
pub fn wire_resize(canvas: web::HtmlCanvasElement, scene: Rc<RefCell<SceneState>>) {
    let Some(window) = web::window() else {
        return;
    };
    dom::add_listener(&window, "resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
        let (w, h) = dom::viewport_size();
        scene.borrow_mut().resize(w, h);
        log::debug!("[resize] {}x{}", w, h);
    });
}
