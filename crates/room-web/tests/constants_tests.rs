// Host-side tests for asset paths.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use room_core::{PianoKey, SoundId};

#[test]
fn sounds_resolve_to_their_files() {
    assert_eq!(sound_url(SoundId::Music), MUSIC_URL);
    assert_eq!(sound_url(SoundId::Click), CLICK_URL);
}

#[test]
fn piano_samples_count_down_from_the_top_key() {
    let urls: Vec<String> = PianoKey::all()
        .map(|k| sound_url(SoundId::Piano(k)))
        .collect();
    assert_eq!(urls.len(), 24);
    assert_eq!(urls[0], "/audio/sfx/piano/Key_24.ogg");
    assert_eq!(urls[23], "/audio/sfx/piano/Key_1.ogg");
}

#[test]
fn favicons_live_under_the_theme_folder() {
    assert_eq!(
        favicon_href("dark", "favicon.svg"),
        "/media/dark-favicon/favicon.svg"
    );
    for (selector, file) in FAVICON_LINKS {
        assert!(selector.starts_with("link["));
        assert!(!file.is_empty());
    }
}
