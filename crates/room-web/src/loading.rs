use room_core::{PianoKey, SoundId};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::constants::{sound_url, ROOM_MODEL_URL};
use crate::dom::js_err;
use crate::ui::Ui;
use crate::{audio, loader, Shared};

fn sounds() -> Vec<SoundId> {
    [SoundId::Music, SoundId::Click]
        .into_iter()
        .chain(PianoKey::all().map(SoundId::Piano))
        .collect()
}

/// Fetch the model and every sound; each completion is reported to the room.
pub fn start(app: &Shared, ui: &Rc<Ui>) {
    let sounds = sounds();
    let total = sounds.len() + 1;
    app.borrow_mut()
        .dispatch(ui, |room, _, effects| room.begin_loading(total, effects));
    log::info!("[loader] fetching {} assets", total);

    {
        let app = app.clone();
        let ui = ui.clone();
        spawn_local(async move {
            match load_model().await {
                Ok(scene) => {
                    log::info!("[loader] model: {} nodes", scene.len());
                    app.borrow_mut().dispatch(&ui, |room, _, effects| {
                        room.load_scene(scene);
                        room.asset_loaded(effects);
                    });
                }
                Err(e) => {
                    let what = format!("{}: {}", ROOM_MODEL_URL, e);
                    app.borrow_mut()
                        .dispatch(&ui, |room, _, effects| room.asset_failed(&what, effects));
                }
            }
        });
    }

    let ctx = app.borrow().audio.context().clone();
    for sound in sounds {
        let app = app.clone();
        let ui = ui.clone();
        let ctx = ctx.clone();
        spawn_local(async move {
            let url = sound_url(sound);
            match load_sound(&ctx, &url).await {
                Ok(buffer) => app.borrow_mut().dispatch(&ui, |room, audio, effects| {
                    audio.insert_buffer(sound, buffer);
                    room.asset_loaded(effects);
                }),
                Err(e) => {
                    let what = format!("{}: {}", url, e);
                    app.borrow_mut()
                        .dispatch(&ui, |room, _, effects| room.asset_failed(&what, effects));
                }
            }
        });
    }
}

async fn load_model() -> anyhow::Result<room_core::SceneGraph> {
    let bytes = fetch_bytes(ROOM_MODEL_URL).await?;
    loader::scene_from_gltf(&bytes)
}

async fn load_sound(ctx: &web::AudioContext, url: &str) -> anyhow::Result<web::AudioBuffer> {
    let bytes = fetch_bytes(url).await?;
    audio::decode(ctx, &bytes).await
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        anyhow::bail!("HTTP {}", response.status());
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
