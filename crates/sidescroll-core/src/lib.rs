pub mod config;
pub mod error;
pub mod scroll;
pub mod sim;
pub mod track;
pub mod viewport;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use scroll::{Direction, ScrollState, ScrollerEngine, ScrollerOptions};
pub use track::{Item, Track};
pub use viewport::{TimerHandle, Viewport};
