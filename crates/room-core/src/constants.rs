use glam::Vec3;
use std::f32::consts::PI;

// Shared interaction/animation tuning constants used by the core and the web frontend.

// Hover feedback
pub const HOVER_SCALE: f32 = 1.4; // scale multiplier applied on hover-enter
pub const FISH_HOVER_SCALE: f32 = 1.2;
pub const HOVER_ENTER_SEC: f32 = 0.5;
pub const HOVER_EXIT_SEC: f32 = 0.3;
pub const HOVER_OVERSHOOT: f32 = 2.0; // back.out(2)
pub const BUTTON_HOVER_TILT: f32 = PI / 10.0;
pub const FLOAT_HOVER_LIFT: f32 = 0.2;
pub const SMOKE_HOVER_SCALE: f32 = 1.4;

// Piano
pub const PIANO_KEY_TILT: f32 = PI / 42.0;
pub const PIANO_PRESS_SEC: f32 = 0.4;
pub const PIANO_RELEASE_SEC: f32 = 0.25;
pub const PIANO_RESUME_MS: f64 = 2000.0; // debounce before background music returns
pub const PIANO_KEY_VOLUME: f32 = 0.5;

// Background music
pub const MUSIC_FADE_MS: f64 = 500.0;
pub const MUSIC_VOLUME: f32 = 1.0;
pub const MUSIC_DUCKED_VOLUME: f32 = 0.0;
pub const CLICK_VOLUME: f32 = 0.5;

// Hitboxes
pub const HITBOX_SIZE_MULTIPLIER: Vec3 = Vec3::new(1.1, 1.75, 1.1);
pub const HITBOX_SUFFIX: &str = "_Hitbox";
pub const HITBOX_SETTLE_MS: f64 = 1950.0; // after the piano keys land

// Intro / loading screen
pub const REVEAL_MS: f64 = 2550.0; // loading screen shrink + fly-away
pub const INTRO_TIME_SCALE: f32 = 0.8;
pub const PIANO_INTRO_TIME_SCALE: f32 = 1.2;
pub const INTRO_STEP_SEC: f32 = 0.8;
pub const INTRO_HOP_SEC: f32 = 0.4;
pub const INTRO_OVERSHOOT: f32 = 1.8;
pub const LETTER_HOP: f32 = 0.3;
pub const PIANO_KEY_HOP: f32 = 0.2;
pub const PIANO_KEY_STAGGER_SEC: f32 = 0.1;

// Theme
pub const THEME_FADE_SEC: f32 = 1.5;

// Classification
pub const FISH_OFFSET: Vec3 = Vec3::new(0.04, 0.0, -0.03);
pub const SMOKE_LIFT: f32 = 0.2;
pub const SMOKE_BASE_Y: f32 = 1.83;
pub const SMOKE_NODE_NAME: &str = "Smoke";

// Ambient motion
pub const FAN_STEP_PER_FRAME: f32 = 0.04;
pub const CHAIR_SWAY_AMPLITUDE: f32 = PI / 8.0;
pub const CHAIR_SWAY_RATE: f32 = 0.5;
pub const CHAIR_SWAY_FLATTEN: f32 = 0.3;
pub const FISH_BOB_AMPLITUDE: f32 = 0.12;
pub const FISH_BOB_RATE_PER_MS: f32 = 0.0015;
pub const FISH_BOB_FLATTEN: f32 = 0.1;

// Camera
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;
pub const MAX_PIXEL_RATIO: f32 = 2.0;

pub const DESKTOP_CAMERA_POSITION: Vec3 = Vec3::new(17.491_731, 9.108_97, 17.850_993);
pub const DESKTOP_CAMERA_TARGET: Vec3 = Vec3::new(0.462_474_68, 1.971_994, -0.830_097_9);
pub const MOBILE_CAMERA_POSITION: Vec3 = Vec3::new(29.567_116, 14.018_476, 31.370_403);
pub const MOBILE_CAMERA_TARGET: Vec3 = Vec3::new(-0.082_062_63, 3.311_923_3, -0.743_392_2);

// Orbit controls
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 45.0;
pub const ORBIT_MIN_POLAR: f32 = 0.0;
pub const ORBIT_MAX_POLAR: f32 = PI / 2.0;
pub const ORBIT_MIN_AZIMUTH: f32 = 0.0;
pub const ORBIT_MAX_AZIMUTH: f32 = PI / 2.0;
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ZOOM_STEP: f32 = 0.95;

// Social links opened from the shelf icons
pub const GITHUB_URL: &str = "https://github.com/andrewwoan/sooahkimsfolio";
pub const YOUTUBE_URL: &str = "https://youtu.be/AB6sulUMRGE";
pub const TWITTER_URL: &str = "https://www.twitter.com/";
