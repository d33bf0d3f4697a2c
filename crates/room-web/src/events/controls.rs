use room_core::{Effect, Room};
use std::rc::Rc;
use web_sys as web;

use crate::audio::WebAudio;
use crate::constants::*;
use crate::dom::{add_listener, query, query_all};
use crate::ui::Ui;
use crate::Shared;

type Action = fn(&mut Room, &mut WebAudio, &mut Vec<Effect>);

fn enter(room: &mut Room, audio: &mut WebAudio, effects: &mut Vec<Effect>) {
    audio.resume();
    if let Err(e) = room.enter(audio, effects) {
        log::info!("[intro] enter ignored: {}", e);
    }
}

fn toggle_theme(room: &mut Room, audio: &mut WebAudio, effects: &mut Vec<Effect>) {
    room.toggle_theme(audio, effects);
}

fn toggle_mute(room: &mut Room, audio: &mut WebAudio, effects: &mut Vec<Effect>) {
    room.toggle_mute(audio, effects);
}

fn modal_exit(room: &mut Room, audio: &mut WebAudio, effects: &mut Vec<Effect>) {
    room.modal_exit(audio, effects);
}

/// The overlay closes silently.
fn overlay_close(room: &mut Room, _: &mut WebAudio, effects: &mut Vec<Effect>) {
    room.close_modal(effects);
}

pub fn wire(app: &Shared, ui: &Rc<Ui>) {
    let doc = &ui.document;
    let buttons = [
        (LOADING_BUTTON_SELECTOR, enter as Action),
        (THEME_TOGGLE_SELECTOR, toggle_theme),
        (MUTE_TOGGLE_SELECTOR, toggle_mute),
        (OVERLAY_SELECTOR, overlay_close),
    ];
    for (selector, action) in buttons {
        match query(doc, selector) {
            Some(el) => on_tap(app, ui, &el, action),
            None => log::warn!("[ui] missing {}", selector),
        }
    }
    for el in query_all(doc, MODAL_EXIT_SELECTOR) {
        on_tap(app, ui, &el, modal_exit);
    }
}

/// Touch acts at once and marks the tap; the click that may follow is dropped.
fn on_tap(app: &Shared, ui: &Rc<Ui>, el: &web::HtmlElement, action: Action) {
    {
        let app = app.clone();
        let ui = ui.clone();
        add_listener(el, "touchend", move |ev: web::TouchEvent| {
            ev.prevent_default();
            let mut app = app.borrow_mut();
            app.room.note_ui_touch();
            app.dispatch(&ui, action);
        });
    }
    {
        let app = app.clone();
        let ui = ui.clone();
        add_listener(el, "click", move |_: web::MouseEvent| {
            let mut app = app.borrow_mut();
            if !app.room.ui_click_allowed() {
                return;
            }
            app.dispatch(&ui, action);
        });
    }
}
