use fnv::FnvHashMap;
use room_core::{AudioBackend, PianoKey, SoundId};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::dom::js_err;

/// Per-sound chain: source -> volume gain -> mute gain -> destination.
struct Channel {
    buffer: Option<web::AudioBuffer>,
    volume: web::GainNode,
    mute: web::GainNode,
}

/// WebAudio playback for the room sounds.
pub struct WebAudio {
    ctx: web::AudioContext,
    channels: FnvHashMap<SoundId, Channel>,
    music_started: bool,
}

impl WebAudio {
    pub fn new(ctx: web::AudioContext) -> anyhow::Result<Self> {
        let mut channels = FnvHashMap::default();
        let sounds = [SoundId::Music, SoundId::Click]
            .into_iter()
            .chain(PianoKey::all().map(SoundId::Piano));
        for sound in sounds {
            channels.insert(sound, Self::channel(&ctx, sound)?);
        }
        Ok(Self {
            ctx,
            channels,
            music_started: false,
        })
    }

    fn channel(ctx: &web::AudioContext, sound: SoundId) -> anyhow::Result<Channel> {
        let volume = ctx.create_gain().map_err(js_err)?;
        volume.gain().set_value(sound.base_volume());
        let mute = ctx.create_gain().map_err(js_err)?;
        volume.connect_with_audio_node(&mute).map_err(js_err)?;
        mute.connect_with_audio_node(&ctx.destination())
            .map_err(js_err)?;
        Ok(Channel {
            buffer: None,
            volume,
            mute,
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    pub fn insert_buffer(&mut self, sound: SoundId, buffer: web::AudioBuffer) {
        if let Some(ch) = self.channels.get_mut(&sound) {
            ch.buffer = Some(buffer);
        }
    }

    /// Browsers keep a fresh context suspended until a user gesture.
    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            if let Ok(promise) = self.ctx.resume() {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("[audio] resume failed: {:?}", e);
                    }
                });
            }
        }
    }
}

pub async fn decode(ctx: &web::AudioContext, bytes: &[u8]) -> anyhow::Result<web::AudioBuffer> {
    let array = js_sys::Uint8Array::from(bytes);
    let promise = ctx.decode_audio_data(&array.buffer()).map_err(js_err)?;
    let decoded = JsFuture::from(promise).await.map_err(js_err)?;
    decoded.dyn_into::<web::AudioBuffer>().map_err(js_err)
}

impl AudioBackend for WebAudio {
    fn play(&mut self, sound: SoundId) {
        if sound == SoundId::Music && self.music_started {
            return;
        }
        let Some(ch) = self.channels.get(&sound) else {
            return;
        };
        let Some(buffer) = ch.buffer.as_ref() else {
            log::debug!("[audio] {:?} not decoded yet", sound);
            return;
        };
        let source = match self.ctx.create_buffer_source() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[audio] source for {:?}: {:?}", sound, e);
                return;
            }
        };
        source.set_buffer(Some(buffer));
        source.set_loop(sound.looping());
        if source.connect_with_audio_node(&ch.volume).is_err() {
            return;
        }
        if source.start().is_ok() && sound == SoundId::Music {
            self.music_started = true;
        }
    }

    fn volume(&self, sound: SoundId) -> f32 {
        self.channels
            .get(&sound)
            .map(|ch| ch.volume.gain().value())
            .unwrap_or(0.0)
    }

    fn set_volume(&mut self, sound: SoundId, volume: f32) {
        if let Some(ch) = self.channels.get(&sound) {
            let gain = ch.volume.gain();
            let _ = gain.cancel_scheduled_values(self.ctx.current_time());
            gain.set_value(volume);
        }
    }

    fn fade(&mut self, sound: SoundId, from: f32, to: f32, duration_ms: f64) {
        if let Some(ch) = self.channels.get(&sound) {
            let now = self.ctx.current_time();
            let gain = ch.volume.gain();
            let _ = gain.cancel_scheduled_values(now);
            let _ = gain.set_value_at_time(from, now);
            let _ = gain.linear_ramp_to_value_at_time(to, now + duration_ms / 1000.0);
        }
    }

    fn set_muted(&mut self, sound: SoundId, muted: bool) {
        if let Some(ch) = self.channels.get(&sound) {
            ch.mute.gain().set_value(if muted { 0.0 } else { 1.0 });
        }
    }
}
