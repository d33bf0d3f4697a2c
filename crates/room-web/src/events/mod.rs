use std::rc::Rc;
use web_sys as web;

use crate::dom;
use crate::ui::Ui;
use crate::Shared;

mod controls;
mod pointer;

pub fn wire(app: &Shared, ui: &Rc<Ui>) {
    pointer::wire(app, ui);
    controls::wire(app, ui);
    wire_resize(app, ui);
}

fn wire_resize(app: &Shared, ui: &Rc<Ui>) {
    let app = app.clone();
    let ui_cb = ui.clone();
    dom::add_listener(&ui.window, "resize", move |_: web::Event| {
        let viewport = dom::viewport(&ui_cb.window);
        app.borrow_mut()
            .dispatch(&ui_cb, |room, _, effects| room.resize(viewport, effects));
    });
}
