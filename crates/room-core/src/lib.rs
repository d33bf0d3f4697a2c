pub mod ambient;
pub mod audio;
pub mod camera;
pub mod constants;
pub mod error;
pub mod hitbox;
pub mod interaction;
pub mod intro;
pub mod picking;
pub mod registry;
pub mod room;
pub mod scene;
pub mod timeline;
pub mod timer;
pub mod tween;

pub use audio::*;
pub use camera::*;
pub use error::*;
pub use hitbox::*;
pub use interaction::*;
pub use picking::*;
pub use registry::*;
pub use room::*;
pub use scene::*;
pub use timer::*;
pub use tween::*;
