#![cfg(target_arch = "wasm32")]
use room_core::{Effect, Room, RoomParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod loading;
mod render;
mod ui;

use audio::WebAudio;
use ui::Ui;

/// Everything the page callbacks share.
pub(crate) struct App {
    pub room: Room,
    pub audio: WebAudio,
    pub effects: Vec<Effect>,
}

pub(crate) type Shared = Rc<RefCell<App>>;

impl App {
    /// Run one room operation and push what it asked for to the page.
    pub fn dispatch(
        &mut self,
        ui: &Ui,
        f: impl FnOnce(&mut Room, &mut WebAudio, &mut Vec<Effect>),
    ) {
        let App {
            room,
            audio,
            effects,
        } = self;
        f(room, audio, effects);
        ui.apply(effects);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("room-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .query_selector(constants::CANVAS_SELECTOR)
        .map_err(dom::js_err)?
        .ok_or_else(|| anyhow::anyhow!("missing {}", constants::CANVAS_SELECTOR))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let viewport = dom::viewport(&window);
    dom::sync_canvas_backing_size(&canvas, &viewport);

    let ctx = web::AudioContext::new().map_err(dom::js_err)?;
    let app: Shared = Rc::new(RefCell::new(App {
        room: Room::new(RoomParams::default(), viewport),
        audio: WebAudio::new(ctx)?,
        effects: Vec::new(),
    }));
    let ui = Rc::new(Ui::new(window, document, canvas.clone()));

    events::wire(&app, &ui);
    loading::start(&app, &ui);

    let gpu = match render::GpuState::new(&canvas).await {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            log::error!("[gpu] renderer unavailable: {:?}", e);
            None
        }
    };
    frame::start_loop(frame::FrameContext::new(app, ui, gpu));
    Ok(())
}
