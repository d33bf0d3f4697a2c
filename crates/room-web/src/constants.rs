use room_core::audio::SoundId;

// Page hooks and static asset locations for the browser front-end.

// Elements
pub const CANVAS_SELECTOR: &str = "#experience-canvas";
pub const LOADING_SCREEN_SELECTOR: &str = ".loading-screen";
pub const LOADING_BUTTON_SELECTOR: &str = ".loading-screen-button";
pub const OVERLAY_SELECTOR: &str = ".overlay";
pub const MODAL_EXIT_SELECTOR: &str = ".modal-exit-button";
pub const THEME_TOGGLE_SELECTOR: &str = ".theme-toggle-button";
pub const MUTE_TOGGLE_SELECTOR: &str = ".mute-toggle-button";
pub const SUN_ICON_SELECTOR: &str = ".sun-svg";
pub const MOON_ICON_SELECTOR: &str = ".moon-svg";
pub const SOUND_ON_ICON_SELECTOR: &str = ".sound-on-svg";
pub const SOUND_OFF_ICON_SELECTOR: &str = ".sound-off-svg";

// Body classes
pub const DARK_THEME_CLASS: &str = "dark-theme";
pub const LIGHT_THEME_CLASS: &str = "light-theme";
pub const LOADING_READY_CLASS: &str = "ready";
pub const LOADING_ENTERED_CLASS: &str = "entered";
pub const LOADING_REVEAL_CLASS: &str = "revealing";

// Loading screen copy
pub const ENTER_LABEL: &str = "Enter!";
pub const GREETING_LABEL: &str = "~ 안녕하세요 ~";
pub const LOAD_FAILED_LABEL: &str = "Couldn't load the room";

// Favicon links, keyed by selector, with the file under `media/<theme>-favicon/`
pub const FAVICON_LINKS: [(&str, &str); 5] = [
    ("link[sizes=\"96x96\"]", "favicon-96x96.png"),
    ("link[type=\"image/svg+xml\"]", "favicon.svg"),
    ("link[rel=\"shortcut icon\"]", "favicon.ico"),
    ("link[rel=\"apple-touch-icon\"]", "apple-touch-icon.png"),
    ("link[rel=\"manifest\"]", "site.webmanifest"),
];

// Assets
pub const ROOM_MODEL_URL: &str = "/models/Room_Portfolio.glb";
pub const MUSIC_URL: &str = "/audio/music/cosmic_candy.ogg";
pub const CLICK_URL: &str = "/audio/sfx/click/bubble.ogg";
pub const PIANO_SAMPLE_DIR: &str = "/audio/sfx/piano";

// Longest frame step fed to the room, so a backgrounded tab doesn't jump
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

pub fn sound_url(sound: SoundId) -> String {
    match sound {
        SoundId::Music => MUSIC_URL.to_string(),
        SoundId::Click => CLICK_URL.to_string(),
        SoundId::Piano(key) => format!("{}/{}.ogg", PIANO_SAMPLE_DIR, key.sample_name()),
    }
}

pub fn favicon_href(theme: &str, file: &str) -> String {
    format!("/media/{}-favicon/{}", theme, file)
}
