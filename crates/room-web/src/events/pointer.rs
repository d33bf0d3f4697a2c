use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

use crate::dom::add_listener;
use crate::input::{self, DragState};
use crate::ui::Ui;
use crate::Shared;

fn ndc(canvas: &web::HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_ndc(
        Vec2::new(client_x as f32, client_y as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

/// Picking follows the window; orbiting starts on the canvas.
pub fn wire(app: &Shared, ui: &Rc<Ui>) {
    let window: &web::EventTarget = &ui.window;
    let canvas: &web::EventTarget = &ui.canvas;

    {
        let app = app.clone();
        let canvas = ui.canvas.clone();
        add_listener(window, "mousemove", move |ev: web::MouseEvent| {
            let at = ndc(&canvas, ev.client_x(), ev.client_y());
            app.borrow_mut().room.pointer_move(at);
        });
    }
    {
        let app = app.clone();
        let canvas = ui.canvas.clone();
        add_listener(window, "touchstart", move |ev: web::TouchEvent| {
            if let Some(touch) = ev.touches().get(0) {
                let at = ndc(&canvas, touch.client_x(), touch.client_y());
                app.borrow_mut().room.touch_start(at);
            }
        });
    }
    {
        let app = app.clone();
        let ui_cb = ui.clone();
        add_listener(window, "touchend", move |ev: web::TouchEvent| {
            let mut app = app.borrow_mut();
            if app.room.state.modal_open() {
                return;
            }
            ev.prevent_default();
            app.dispatch(&ui_cb, |room, audio, effects| room.touch_end(audio, effects));
        });
    }
    {
        let app = app.clone();
        let ui_cb = ui.clone();
        add_listener(window, "click", move |_: web::MouseEvent| {
            app.borrow_mut()
                .dispatch(&ui_cb, |room, audio, effects| room.click(audio, effects));
        });
    }

    let drag = Rc::new(RefCell::new(DragState::default()));
    {
        let drag = drag.clone();
        add_listener(canvas, "pointerdown", move |ev: web::PointerEvent| {
            let at = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            drag.borrow_mut().begin(ev.pointer_id(), at);
        });
    }
    {
        let app = app.clone();
        let drag = drag.clone();
        let canvas = ui.canvas.clone();
        add_listener(window, "pointermove", move |ev: web::PointerEvent| {
            let at = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let Some(delta) = drag.borrow_mut().move_to(ev.pointer_id(), at) else {
                return;
            };
            let height = canvas.get_bounding_client_rect().height() as f32;
            let (left, up) = input::drag_to_orbit(delta, height);
            app.borrow_mut().room.controls.rotate(left, up);
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        add_listener(window, name, move |ev: web::PointerEvent| {
            drag.borrow_mut().end(ev.pointer_id());
        });
    }
    {
        let app = app.clone();
        add_listener(canvas, "wheel", move |ev: web::WheelEvent| {
            ev.prevent_default();
            app.borrow_mut()
                .room
                .controls
                .zoom(input::wheel_steps(ev.delta_y()));
        });
    }
}
