//! Deterministic host for the scroller engine
//!
//! [`SimulatedViewport`] keeps the track in memory and runs timers on a virtual
//! clock, so whole sessions can be driven without waiting. [`play`] runs the
//! same loop against tokio's clock for real-time playback.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::scroll::{Direction, ScrollState, ScrollerEngine};
use crate::track::Track;
use crate::viewport::{TimerHandle, Viewport};
use crate::Result;

/// In-memory viewport with a virtual clock
#[derive(Debug, Clone, Default)]
pub struct SimulatedViewport {
    track: Track,
    now: Duration,
    /// Pending timers and their deadlines
    timers: Vec<(TimerHandle, Duration)>,
    next_timer: u64,
    navigation_bound: bool,
}

impl SimulatedViewport {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            ..Default::default()
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Elapsed virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_navigation_bound(&self) -> bool {
        self.navigation_bound
    }

    /// Earliest pending timer, without removing it
    pub fn next_due(&self) -> Option<(TimerHandle, Duration)> {
        self.timers
            .iter()
            .copied()
            .min_by_key(|(handle, deadline)| (*deadline, *handle))
    }

    /// Remove the earliest pending timer and advance the clock to its deadline
    pub fn pop_due(&mut self) -> Option<(TimerHandle, Duration)> {
        let (handle, deadline) = self.next_due()?;
        self.timers.retain(|(h, _)| *h != handle);
        self.now = self.now.max(deadline);
        Some((handle, deadline))
    }
}

impl Viewport for SimulatedViewport {
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
        self.timers.push((handle, self.now + delay));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
    }

    fn bind_navigation(&mut self) {
        self.navigation_bound = true;
    }

    fn unbind_navigation(&mut self) {
        self.navigation_bound = false;
    }
}

/// Snapshot of the track after one engine step
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub elapsed_ms: f64,
    pub offset: i32,
    pub distance_moved: u32,
    pub speed_multiplier: u32,
    /// Direction of the live session, `None` once the engine is idle
    pub sliding: Option<Direction>,
    pub order: Vec<String>,
}

impl Frame {
    fn capture(engine: &ScrollerEngine<SimulatedViewport>, started: Duration) -> Self {
        let viewport = engine.viewport();
        let session = engine.session();
        Self {
            elapsed_ms: (viewport.now().saturating_sub(started)).as_secs_f64() * 1000.0,
            offset: viewport.track().offset(),
            distance_moved: session.map(|s| s.distance_moved()).unwrap_or(0),
            speed_multiplier: session.map(|s| s.speed_multiplier()).unwrap_or(0),
            sliding: match engine.state() {
                ScrollState::Sliding(direction) => Some(direction),
                ScrollState::Idle => None,
            },
            order: viewport.track().labels(),
        }
    }
}

/// Recorded run of one navigation action
#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    pub direction: Direction,
    /// False when navigation was disabled and the action was ignored
    pub accepted: bool,
    /// Number of offset steps taken
    pub steps: usize,
    pub frames: Vec<Frame>,
}

impl Timeline {
    fn ignored(direction: Direction) -> Self {
        Self {
            direction,
            accepted: false,
            steps: 0,
            frames: Vec::new(),
        }
    }

    /// Virtual time from navigation to the final frame
    pub fn duration_ms(&self) -> f64 {
        self.frames.last().map(|f| f.elapsed_ms).unwrap_or(0.0)
    }

    fn push(&mut self, frame: Frame) {
        if frame.sliding.is_some() {
            self.steps += 1;
        }
        self.frames.push(frame);
    }
}

/// Navigate and fire timers on the virtual clock until the engine is idle
pub fn run_session(
    engine: &mut ScrollerEngine<SimulatedViewport>,
    direction: Direction,
) -> Result<Timeline> {
    let started = engine.viewport().now();
    if !engine.navigate(direction)? {
        return Ok(Timeline::ignored(direction));
    }

    let mut timeline = Timeline {
        direction,
        accepted: true,
        steps: 0,
        frames: Vec::new(),
    };
    timeline.push(Frame::capture(engine, started));

    while let Some((handle, _)) = engine.viewport_mut().pop_due() {
        if engine.on_timer(handle)? {
            timeline.push(Frame::capture(engine, started));
        }
    }

    debug!(%direction, steps = timeline.steps, "Simulated session complete");
    Ok(timeline)
}

/// Like [`run_session`], but waits out every delay on tokio's clock and
/// reports each frame as it happens
pub async fn play<F>(
    engine: &mut ScrollerEngine<SimulatedViewport>,
    direction: Direction,
    mut on_frame: F,
) -> Result<Timeline>
where
    F: FnMut(&Frame),
{
    let started = engine.viewport().now();
    if !engine.navigate(direction)? {
        return Ok(Timeline::ignored(direction));
    }

    let mut timeline = Timeline {
        direction,
        accepted: true,
        steps: 0,
        frames: Vec::new(),
    };
    let frame = Frame::capture(engine, started);
    on_frame(&frame);
    timeline.push(frame);

    while let Some((_, deadline)) = engine.viewport().next_due() {
        let wait = deadline.saturating_sub(engine.viewport().now());
        tokio::time::sleep(wait).await;

        let Some((handle, _)) = engine.viewport_mut().pop_due() else {
            break;
        };
        if engine.on_timer(handle)? {
            let frame = Frame::capture(engine, started);
            on_frame(&frame);
            timeline.push(frame);
        }
    }

    Ok(timeline)
}
