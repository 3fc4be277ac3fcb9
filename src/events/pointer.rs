use crate::dom;
use crate::render::SceneState;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Steer the spot light with the pointer, anywhere over the page.
pub fn wire_pointer_move(scene: Rc<RefCell<SceneState>>) {
    let Some(window) = web::window() else {
        return;
    };
    dom::add_listener(&window, "pointermove", move |ev: web::PointerEvent| {
        scene
            .borrow_mut()
            .pointer_moved(ev.client_x() as f32, ev.client_y() as f32);
    });
}
