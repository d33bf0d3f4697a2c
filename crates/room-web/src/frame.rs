use instant::Instant;
use room_core::ambient::LocalTime;
use room_core::FrameInput;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::MAX_FRAME_DT_SEC;
use crate::render;
use crate::ui::Ui;
use crate::{App, Shared};

pub struct FrameContext {
    pub app: Shared,
    pub ui: Rc<Ui>,
    pub gpu: Option<render::GpuState>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(app: Shared, ui: Rc<Ui>, gpu: Option<render::GpuState>) -> Self {
        Self {
            app,
            ui,
            gpu,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self, timestamp_ms: f64) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let input = FrameInput {
            now_ms: timestamp_ms,
            dt_sec,
            local_time: local_time(),
        };

        let mut app = self.app.borrow_mut();
        let App {
            room,
            audio,
            effects,
        } = &mut *app;
        room.frame(input, audio, effects);
        self.ui.apply(effects);

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(self.ui.canvas.width(), self.ui.canvas.height());
            match gpu.render(room) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        }
    }
}

fn local_time() -> LocalTime {
    let date = js_sys::Date::new_0();
    LocalTime {
        hours: date.get_hours(),
        minutes: date.get_minutes(),
        seconds: date.get_seconds(),
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn start_loop(ctx: FrameContext) {
    let ctx = Rc::new(RefCell::new(ctx));
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_next = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        ctx.borrow_mut().frame(timestamp);
        request_frame(&tick_next);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&tick);
}

fn request_frame(tick: &Tick) {
    if let (Some(window), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
