use room_core::{CursorStyle, Effect, ModalKind};
use web_sys as web;

use crate::constants::*;
use crate::dom::{query, set_display, set_style};

/// Page elements the room talks to.
pub struct Ui {
    pub window: web::Window,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
}

impl Ui {
    pub fn new(
        window: web::Window,
        document: web::Document,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        Self {
            window,
            document,
            canvas,
        }
    }

    pub fn apply(&self, effects: &mut Vec<Effect>) {
        for effect in effects.drain(..) {
            self.apply_one(effect);
        }
    }

    fn apply_one(&self, effect: Effect) {
        match effect {
            Effect::EntryReady => {
                if let Some(button) = query(&self.document, LOADING_BUTTON_SELECTOR) {
                    button.set_text_content(Some(ENTER_LABEL));
                    let _ = button.class_list().add_1(LOADING_READY_CLASS);
                    set_style(&button, "cursor", "pointer");
                }
            }
            Effect::LoadFailed(reason) => {
                log::error!("[loader] {}", reason);
                if let Some(button) = query(&self.document, LOADING_BUTTON_SELECTOR) {
                    button.set_text_content(Some(LOAD_FAILED_LABEL));
                    button.set_title(&reason);
                }
            }
            Effect::RevealStarted => {
                if let Some(button) = query(&self.document, LOADING_BUTTON_SELECTOR) {
                    button.set_text_content(Some(GREETING_LABEL));
                    let _ = button.class_list().add_1(LOADING_ENTERED_CLASS);
                    set_style(&button, "cursor", "default");
                }
                if let Some(screen) = query(&self.document, LOADING_SCREEN_SELECTOR) {
                    let _ = screen.class_list().add_1(LOADING_REVEAL_CLASS);
                }
                self.set_favicons("dark");
            }
            Effect::LoadingScreenDone => {
                if let Some(screen) = query(&self.document, LOADING_SCREEN_SELECTOR) {
                    screen.remove();
                }
            }
            Effect::ShowModal(kind) => {
                set_display(&self.document, &modal_selector(kind), true);
                set_display(&self.document, OVERLAY_SELECTOR, true);
            }
            Effect::HideModal(kind) => {
                set_display(&self.document, &modal_selector(kind), false);
                set_display(&self.document, OVERLAY_SELECTOR, false);
            }
            Effect::OpenLink(url) => {
                if let Err(e) = self.window.open_with_url_and_target_and_features(
                    url,
                    "_blank",
                    "noopener,noreferrer",
                ) {
                    log::warn!("[ui] open {} failed: {:?}", url, e);
                }
            }
            Effect::Cursor(style) => self.set_cursor(style),
            Effect::ThemeChanged { night } => self.set_theme(night),
            Effect::MuteChanged { muted } => {
                set_display(&self.document, SOUND_ON_ICON_SELECTOR, !muted);
                set_display(&self.document, SOUND_OFF_ICON_SELECTOR, muted);
            }
            Effect::Resized { width, height } => {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
            }
        }
    }

    fn set_cursor(&self, style: CursorStyle) {
        if let Some(body) = self.document.body() {
            set_style(&body, "cursor", style.css());
        }
    }

    fn set_theme(&self, night: bool) {
        if let Some(body) = self.document.body() {
            let classes = body.class_list();
            let (on, off) = if night {
                (DARK_THEME_CLASS, LIGHT_THEME_CLASS)
            } else {
                (LIGHT_THEME_CLASS, DARK_THEME_CLASS)
            };
            let _ = classes.remove_1(off);
            let _ = classes.add_1(on);
        }
        set_display(&self.document, SUN_ICON_SELECTOR, !night);
        set_display(&self.document, MOON_ICON_SELECTOR, night);
        self.set_favicons(if night { "dark" } else { "light" });
    }

    fn set_favicons(&self, theme: &str) {
        for (selector, file) in FAVICON_LINKS {
            if let Ok(Some(link)) = self.document.query_selector(selector) {
                let _ = link.set_attribute("href", &favicon_href(theme, file));
            }
        }
    }
}

fn modal_selector(kind: ModalKind) -> String {
    format!(".modal.{}", kind.id())
}
