//! Viewport adapter contract consumed by the scroller engine
//!
//! A host (terminal, simulator, browser bridge) implements [`Viewport`] to give
//! the engine access to the track geometry, item order, timers and the
//! navigation controls. Timers carry no callback: when a scheduled timer
//! expires, the host calls [`ScrollerEngine::on_timer`](crate::ScrollerEngine::on_timer)
//! with the handle it returned from [`Viewport::schedule_after`].

use std::fmt;
use std::time::Duration;

use crate::Result;

/// Opaque handle of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Host side of the scroller
pub trait Viewport {
    /// Number of items currently on the track
    fn item_count(&self) -> usize;

    /// Width of the item at `index` in pixels, including its left margin
    fn item_width(&self, index: usize) -> Result<u32>;

    /// Current horizontal offset of the track
    fn offset(&self) -> Result<i32>;

    /// Set the horizontal offset of the track
    fn set_offset(&mut self, offset: i32) -> Result<()>;

    /// Set the total width of the track
    fn set_track_width(&mut self, width: u32) -> Result<()>;

    /// Relocate the item at `index` to the head of the track
    fn move_item_to_front(&mut self, index: usize) -> Result<()>;

    /// Relocate the item at `index` to the tail of the track
    fn move_item_to_back(&mut self, index: usize) -> Result<()>;

    /// Arrange for the engine to be woken after `delay`
    fn schedule_after(&mut self, delay: Duration) -> Result<TimerHandle>;

    /// Drop a pending timer. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Make the prev/next controls live
    fn bind_navigation(&mut self);

    /// Make the prev/next controls inert
    fn unbind_navigation(&mut self);
}
