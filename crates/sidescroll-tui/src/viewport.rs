use std::time::{Duration, Instant};

use sidescroll_core::{Result, TimerHandle, Track, Viewport};

/// Viewport backed by an in-memory track and wall-clock timers.
///
/// The event loop polls [`take_due`](Self::take_due) and forwards expired
/// handles to the engine.
#[derive(Debug)]
pub struct TerminalViewport {
    track: Track,
    timers: Vec<(TimerHandle, Instant)>,
    next_timer: u64,
    controls_live: bool,
}

impl TerminalViewport {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            timers: Vec::new(),
            next_timer: 0,
            controls_live: false,
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Whether the prev/next controls currently accept input
    pub fn controls_live(&self) -> bool {
        self.controls_live
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Remove and return the earliest timer that has expired by `now`
    pub fn take_due(&mut self, now: Instant) -> Option<TimerHandle> {
        let (idx, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .min_by_key(|(_, (_, deadline))| *deadline)?;
        Some(self.timers.remove(idx).0)
    }
}

impl Viewport for TerminalViewport {
    fn item_count(&self) -> usize {
        self.track.len()
    }

    fn item_width(&self, index: usize) -> Result<u32> {
        Ok(self.track.get(index)?.outer_width())
    }

    fn offset(&self) -> Result<i32> {
        Ok(self.track.offset())
    }

    fn set_offset(&mut self, offset: i32) -> Result<()> {
        self.track.set_offset(offset);
        Ok(())
    }

    fn set_track_width(&mut self, width: u32) -> Result<()> {
        self.track.set_width(width);
        Ok(())
    }

    fn move_item_to_front(&mut self, index: usize) -> Result<()> {
        self.track.rotate_to_front(index)
    }

    fn move_item_to_back(&mut self, index: usize) -> Result<()> {
        self.track.rotate_to_back(index)
    }

    fn schedule_after(&mut self, delay: Duration) -> Result<TimerHandle> {
        self.next_timer += 1;
        let handle = TimerHandle::new(self.next_timer);
        self.timers.push((handle, Instant::now() + delay));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
    }

    fn bind_navigation(&mut self) {
        self.controls_live = true;
    }

    fn unbind_navigation(&mut self) {
        self.controls_live = false;
    }
}
