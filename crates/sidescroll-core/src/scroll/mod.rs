//! Scroller engine for the sidescroll carousel
//!
//! # Layers
//!
//! - `timing` - Pure tick interval, increment and delay calculations
//! - `session` - Per-navigation state and the pure tick function
//! - `engine` - Controller that applies ticks to a [`Viewport`](crate::Viewport)
//!
//! # Usage
//!
//! ```ignore
//! use sidescroll_core::scroll::{ScrollerEngine, ScrollerOptions};
//!
//! let mut engine = ScrollerEngine::new(viewport, ScrollerOptions::default())?;
//!
//! // User pressed "next"
//! engine.forward()?;
//!
//! // Host timer expired
//! engine.on_timer(handle)?;
//! ```

pub mod timing;
pub mod session;
pub mod engine;

pub use engine::{ScrollState, ScrollerEngine, ScrollerOptions};
pub use session::{Direction, ScrollSession, SessionPlan, Tick};
pub use timing::TICKS_PER_SCROLL;
