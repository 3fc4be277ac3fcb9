use crate::core::scroll::{hint_visible, smooth_wheel_delta, ScrollStore, SmoothScroll};
use crate::dom;
use crate::frame;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Install eased wheel scrolling over the window and start its animation loop,
/// which publishes every tick's offset into `store`.
pub fn wire_smooth_scroll(store: Rc<ScrollStore>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let driver = Rc::new(RefCell::new(SmoothScroll::default()));
    {
        let mut d = driver.borrow_mut();
        d.set_limit(scroll_limit(&window));
        d.sync(window.scroll_y().unwrap_or(0.0));
        store.set(d.current());
    }

    // wheel: non-passive so the native jump can be cancelled
    let wheel_driver = driver.clone();
    let wheel_window = window.clone();
    let on_wheel = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let page = wheel_window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let Some(delta) =
            smooth_wheel_delta(ev.delta_y(), ev.delta_mode(), page, ev.ctrl_key())
        else {
            return;
        };
        ev.prevent_default();
        let mut d = wheel_driver.borrow_mut();
        d.set_limit(scroll_limit(&wheel_window));
        d.scroll_by(delta);
    }) as Box<dyn FnMut(web::WheelEvent)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            on_wheel.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(dom::js_err)?;
    on_wheel.forget();

    // scrollbar drags, keys and touch move the page natively
    let sync_driver = driver.clone();
    let sync_window = window.clone();
    dom::add_listener(&window, "scroll", move |_: web::Event| {
        sync_driver
            .borrow_mut()
            .sync(sync_window.scroll_y().unwrap_or(0.0));
    });

    let hint = document.query_selector(".scroll-icon").ok().flatten();
    if hint.is_none() {
        log::warn!("[scroll] no .scroll-icon element, hint disabled");
    }

    frame::request_loop(move || {
        let mut d = driver.borrow_mut();
        d.set_limit(scroll_limit(&window));
        let was_animating = d.is_animating();
        let offset = d.tick();
        if was_animating {
            window.scroll_to_with_x_and_y(0.0, offset);
        }
        store.set(offset);
        if let Some(el) = &hint {
            _ = el.class_list().toggle_with_force("hidden", !hint_visible(offset));
        }
    });
    log::info!("[scroll] smooth scrolling on");
    Ok(())
}

/// Largest scroll offset of the page.
fn scroll_limit(window: &web::Window) -> f64 {
    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return 0.0;
    };
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (root.scroll_height() as f64 - viewport).max(0.0)
}
