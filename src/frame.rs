use crate::core::scroll::ScrollStore;
use crate::core::SceneParams;
use crate::render::{self, SceneState};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the render tick reads or writes.
pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<SceneState>>,
    pub params: Rc<RefCell<SceneParams>>,
    pub scroll: Rc<ScrollStore>,
    pub gpu: Rc<RefCell<render::GpuState<'a>>>,
    pub canvas: web::HtmlCanvasElement,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let params = self.params.borrow();
        let mut scene = self.scene.borrow_mut();
        scene.tick(&params, self.scroll.get(), elapsed_ms);

        let mut gpu = self.gpu.borrow_mut();
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        match gpu.render(&mut scene, &params) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<SceneState>>,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let (plane, generation) = {
        let s = scene.borrow();
        (s.plane, s.plane_generation)
    };
    render::GpuState::new(leaked_canvas, plane, generation).await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    request_loop(move || frame_ctx.borrow_mut().frame());
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Run `step` once per animation frame, forever.
pub fn request_loop(mut step: impl FnMut() + 'static) {
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        step();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &TickSlot) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
