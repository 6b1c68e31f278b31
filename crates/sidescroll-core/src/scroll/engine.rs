//! Scroller engine: navigation, timed stepping and item recycling
//!
//! The engine owns the viewport for its whole lifetime. A navigation action
//! disables further navigation, optionally pre-stages items at the head of the
//! track, then steps the offset once per timer until the session's distance is
//! covered. Finishing a session recycles items so the strip appears to loop,
//! snaps the offset back to where it started and re-enables navigation.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::session::{Direction, ScrollSession, SessionPlan, Tick};
use super::timing::{self, TICKS_PER_SCROLL};
use crate::viewport::{TimerHandle, Viewport};
use crate::{Error, Result};

/// User-facing scroller options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollerOptions {
    /// Seconds for a full scroll of `num_to_scroll` items
    pub duration: f64,
    /// Items moved per navigation action
    pub num_to_scroll: u32,
}

impl Default for ScrollerOptions {
    fn default() -> Self {
        Self {
            duration: 0.5,
            num_to_scroll: 1,
        }
    }
}

impl ScrollerOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(Error::Config(format!(
                "duration must be a positive number of seconds, got {}",
                self.duration
            )));
        }
        if self.num_to_scroll == 0 {
            return Err(Error::Config("num_to_scroll must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Observable state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    Idle,
    Sliding(Direction),
}

#[derive(Debug)]
pub struct ScrollerEngine<V> {
    viewport: V,
    options: ScrollerOptions,
    item_width: u32,
    total_move_distance: u32,
    tick_interval: Duration,
    navigation_enabled: bool,
    session: Option<ScrollSession>,
}

impl<V: Viewport> ScrollerEngine<V> {
    /// Measure the track, size it and enable navigation
    pub fn new(mut viewport: V, options: ScrollerOptions) -> Result<Self> {
        options.validate()?;

        let item_count = viewport.item_count();
        if item_count == 0 {
            return Err(Error::Config("the track has no items".to_string()));
        }

        let item_width = viewport.item_width(0)?;
        if item_width == 0 {
            return Err(Error::Config("the first item has zero width".to_string()));
        }

        let total_move_distance = item_width
            .checked_mul(options.num_to_scroll)
            .filter(|total| *total <= i32::MAX as u32)
            .ok_or_else(|| {
                Error::Config(format!(
                    "scrolling {} items of {}px overflows the track",
                    options.num_to_scroll, item_width
                ))
            })?;

        let track_width = u32::try_from(item_width as u64 * item_count as u64)
            .map_err(|_| Error::Config(format!("{} items are too wide for a track", item_count)))?;

        let tick_interval = timing::tick_interval(options.duration);

        viewport.set_track_width(track_width)?;
        viewport.bind_navigation();

        info!(
            item_count,
            item_width,
            total_move_distance,
            track_width,
            tick_interval_ms = tick_interval.as_millis() as u64,
            "Scroller initialized"
        );

        Ok(Self {
            viewport,
            options,
            item_width,
            total_move_distance,
            tick_interval,
            navigation_enabled: true,
            session: None,
        })
    }

    pub fn options(&self) -> &ScrollerOptions {
        &self.options
    }

    /// Width of one item including its margin, measured at initialization
    pub fn item_width(&self) -> u32 {
        self.item_width
    }

    pub fn total_move_distance(&self) -> u32 {
        self.total_move_distance
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[inline]
    pub fn is_navigation_enabled(&self) -> bool {
        self.navigation_enabled
    }

    pub fn state(&self) -> ScrollState {
        match &self.session {
            Some(session) => ScrollState::Sliding(session.direction()),
            None => ScrollState::Idle,
        }
    }

    pub fn session(&self) -> Option<&ScrollSession> {
        self.session.as_ref()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn into_viewport(self) -> V {
        self.viewport
    }

    /// Scroll to the next items
    pub fn forward(&mut self) -> Result<bool> {
        self.navigate(Direction::Forward)
    }

    /// Scroll to the previous items
    pub fn backward(&mut self) -> Result<bool> {
        self.navigate(Direction::Backward)
    }

    /// Start a session in `direction`.
    ///
    /// Returns `Ok(false)` without touching anything while navigation is
    /// disabled. On a viewport error the session is dropped and navigation
    /// stays disabled until [`reset`](Self::reset).
    pub fn navigate(&mut self, direction: Direction) -> Result<bool> {
        if !self.navigation_enabled {
            debug!(%direction, "Navigation ignored while a session is active");
            return Ok(false);
        }

        self.navigation_enabled = false;
        self.viewport.unbind_navigation();

        let increment = self.increment();
        let origin = self.viewport.offset()?;

        if direction == Direction::Backward {
            let staged = origin
                .checked_sub(self.total_move_distance as i32)
                .ok_or_else(|| offset_overflow(origin, -(self.total_move_distance as i64)))?;
            self.prestage()?;
            self.viewport.set_offset(staged)?;
        }

        info!(%direction, origin, increment, "Scroll session started");
        self.session = Some(ScrollSession::new(direction, origin, increment));
        self.step()?;

        Ok(true)
    }

    /// Handle an expired timer. Handles that do not belong to the live session
    /// are ignored and reported as `Ok(false)`.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Result<bool> {
        match self.session.as_mut() {
            Some(session) if session.timer() == Some(handle) => session.set_timer(None),
            _ => {
                debug!(%handle, "Ignoring stale timer");
                return Ok(false);
            }
        }

        self.step()?;
        Ok(true)
    }

    /// Abort any live session and re-enable navigation.
    ///
    /// The offset goes back to the session's origin; items already pre-staged
    /// stay where they are.
    pub fn reset(&mut self) -> Result<()> {
        let restored = match self.session.take() {
            Some(session) => {
                if let Some(timer) = session.timer() {
                    self.viewport.cancel(timer);
                }
                warn!(direction = %session.direction(), "Scroll session aborted");
                self.viewport.set_offset(session.origin())
            }
            None => Ok(()),
        };

        self.navigation_enabled = true;
        self.viewport.bind_navigation();
        restored
    }

    fn increment(&self) -> u32 {
        let raw = timing::step_increment(self.item_width, self.options.duration);
        if raw == 0 {
            warn!(
                item_width = self.item_width,
                duration = self.options.duration,
                "Step increment rounds to zero over {} ticks, using 1px",
                TICKS_PER_SCROLL
            );
            1
        } else {
            raw
        }
    }

    fn plan(&self) -> SessionPlan {
        SessionPlan {
            total_move_distance: self.total_move_distance,
            tick_interval: self.tick_interval,
        }
    }

    /// Move `num_to_scroll` items from the tail to the head
    fn prestage(&mut self) -> Result<()> {
        for _ in 0..self.options.num_to_scroll {
            let last = self.viewport.item_count().saturating_sub(1);
            self.viewport.move_item_to_front(last)?;
        }
        Ok(())
    }

    /// Move `num_to_scroll` items from the head to the tail
    fn recycle(&mut self) -> Result<()> {
        for _ in 0..self.options.num_to_scroll {
            self.viewport.move_item_to_back(0)?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        let result = self.step_inner();
        if result.is_err() {
            self.abort();
        }
        result
    }

    fn step_inner(&mut self) -> Result<()> {
        let plan = self.plan();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        match session.advance(&plan) {
            Tick::Moved { delta, next_delay } => {
                let current = self.viewport.offset()?;
                let offset = current
                    .checked_add(delta)
                    .ok_or_else(|| offset_overflow(current, delta as i64))?;
                self.viewport.set_offset(offset)?;
                let timer = self.viewport.schedule_after(next_delay)?;
                session.set_timer(Some(timer));
                debug!(
                    offset,
                    distance_moved = session.distance_moved(),
                    speed_multiplier = session.speed_multiplier(),
                    next_delay_us = next_delay.as_micros() as u64,
                    "Scroll step"
                );
                Ok(())
            }
            Tick::Finished => self.finish(),
        }
    }

    fn finish(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        if let Some(timer) = session.timer() {
            self.viewport.cancel(timer);
        }

        if session.direction() == Direction::Forward {
            self.recycle()?;
        }
        self.viewport.set_offset(session.origin())?;

        self.navigation_enabled = true;
        self.viewport.bind_navigation();

        info!(
            direction = %session.direction(),
            distance_moved = session.distance_moved(),
            ticks = session.speed_multiplier(),
            "Scroll session finished"
        );
        Ok(())
    }

    /// Drop the live session after a viewport failure. Navigation stays
    /// disabled.
    fn abort(&mut self) {
        if let Some(session) = self.session.take() {
            if let Some(timer) = session.timer() {
                self.viewport.cancel(timer);
            }
            warn!(
                direction = %session.direction(),
                "Scroll session aborted by a viewport error; navigation stays disabled"
            );
        }
    }
}

fn offset_overflow(offset: i32, delta: i64) -> Error {
    Error::Viewport(format!("moving offset {} by {}px overflows", offset, delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{run_session, SimulatedViewport};
    use crate::track::Track;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn engine(count: usize, options: ScrollerOptions) -> ScrollerEngine<SimulatedViewport> {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let track = Track::uniform(names.iter().take(count).copied(), 100, 5);
        ScrollerEngine::new(SimulatedViewport::new(track), options).unwrap()
    }

    #[test]
    fn test_init_derives_geometry() {
        let engine = engine(5, ScrollerOptions::default());
        assert_eq!(engine.item_width(), 105);
        assert_eq!(engine.total_move_distance(), 105);
        assert_eq!(engine.tick_interval(), Duration::from_millis(17));
        assert_eq!(engine.viewport().track().width(), 525);
        assert!(engine.is_navigation_enabled());
        assert!(engine.viewport().is_navigation_bound());
        assert_eq!(engine.state(), ScrollState::Idle);
    }

    #[test]
    fn test_init_rejects_empty_track() {
        let err = ScrollerEngine::new(
            SimulatedViewport::new(Track::default()),
            ScrollerOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_init_rejects_bad_options() {
        for options in [
            ScrollerOptions { duration: 0.0, num_to_scroll: 1 },
            ScrollerOptions { duration: -1.0, num_to_scroll: 1 },
            ScrollerOptions { duration: f64::NAN, num_to_scroll: 1 },
            ScrollerOptions { duration: 0.5, num_to_scroll: 0 },
        ] {
            let track = Track::uniform(["A"], 100, 5);
            let result = ScrollerEngine::new(SimulatedViewport::new(track), options);
            assert!(matches!(result, Err(Error::Config(_))), "{:?}", options);
        }
    }

    #[test]
    fn test_backward_session_sixteen_steps() {
        let mut engine = engine(5, ScrollerOptions::default());
        let timeline = run_session(&mut engine, Direction::Backward).unwrap();
        assert_eq!(timeline.steps, 16);
        assert_eq!(engine.state(), ScrollState::Idle);
        assert_eq!(engine.viewport().track().offset(), 0);
        assert!(engine.session().is_none());
        // Cyclic order intact, rotated right by one
        assert_eq!(engine.viewport().track().labels(), labels(&["E", "A", "B", "C", "D"]));
    }

    #[test]
    fn test_backward_prestage_keeps_visual_position() {
        let mut engine = engine(5, ScrollerOptions::default());
        engine.backward().unwrap();
        let track = engine.viewport().track();
        assert_eq!(track.labels(), labels(&["E", "A", "B", "C", "D"]));
        // Pre-staged by -105, then one step of +7
        assert_eq!(track.offset(), -98);
    }

    #[test]
    fn test_forward_session_rotates_left() {
        let mut engine = engine(5, ScrollerOptions { duration: 0.5, num_to_scroll: 2 });
        let timeline = run_session(&mut engine, Direction::Forward).unwrap();
        assert_eq!(engine.viewport().track().labels(), labels(&["C", "D", "E", "A", "B"]));
        assert_eq!(engine.viewport().track().offset(), 0);
        assert_eq!(engine.total_move_distance(), 210);
        // 7px steps while distance < 210
        assert_eq!(timeline.steps, 30);
        assert!(engine.is_navigation_enabled());
    }

    #[test]
    fn test_forward_offset_moves_left_during_session() {
        let mut engine = engine(5, ScrollerOptions::default());
        engine.forward().unwrap();
        assert_eq!(engine.viewport().track().offset(), -7);
        assert_eq!(engine.state(), ScrollState::Sliding(Direction::Forward));
    }

    #[test]
    fn test_offset_returns_to_non_zero_origin() {
        let mut engine = engine(5, ScrollerOptions::default());
        engine.viewport_mut().set_offset(12).unwrap();
        run_session(&mut engine, Direction::Forward).unwrap();
        assert_eq!(engine.viewport().track().offset(), 12);
        run_session(&mut engine, Direction::Backward).unwrap();
        assert_eq!(engine.viewport().track().offset(), 12);
    }

    #[test]
    fn test_navigation_ignored_while_sliding() {
        let mut engine = engine(5, ScrollerOptions::default());
        assert!(engine.forward().unwrap());
        let pending = engine.viewport().pending_timers();
        let offset = engine.viewport().track().offset();
        let session = engine.session().cloned();

        assert!(!engine.forward().unwrap());
        assert!(!engine.backward().unwrap());

        assert_eq!(engine.viewport().pending_timers(), pending);
        assert_eq!(engine.viewport().track().offset(), offset);
        assert_eq!(engine.session().cloned(), session);
        assert!(!engine.viewport().is_navigation_bound());
    }

    #[test]
    fn test_second_forward_works_after_first_finishes() {
        let mut engine = engine(5, ScrollerOptions::default());
        assert!(engine.forward().unwrap());
        assert!(!engine.forward().unwrap());
        while let Some((handle, _)) = engine.viewport_mut().pop_due() {
            engine.on_timer(handle).unwrap();
        }
        assert_eq!(engine.viewport().track().labels(), labels(&["B", "C", "D", "E", "A"]));
        assert!(engine.forward().unwrap());
    }

    #[test]
    fn test_round_trip_restores_order() {
        let mut engine = engine(5, ScrollerOptions { duration: 0.3, num_to_scroll: 3 });
        run_session(&mut engine, Direction::Forward).unwrap();
        run_session(&mut engine, Direction::Backward).unwrap();
        assert_eq!(engine.viewport().track().labels(), labels(&["A", "B", "C", "D", "E"]));
        assert_eq!(engine.viewport().track().offset(), 0);
    }

    #[test]
    fn test_total_distance_fixed_after_init() {
        let mut engine = engine(5, ScrollerOptions { duration: 0.5, num_to_scroll: 2 });
        run_session(&mut engine, Direction::Forward).unwrap();
        run_session(&mut engine, Direction::Backward).unwrap();
        assert_eq!(engine.total_move_distance(), 210);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut engine = engine(5, ScrollerOptions::default());
        assert!(!engine.on_timer(TimerHandle::new(999)).unwrap());
        engine.forward().unwrap();
        assert!(!engine.on_timer(TimerHandle::new(999)).unwrap());
        assert_eq!(engine.session().unwrap().distance_moved(), 7);
    }

    #[test]
    fn test_narrow_items_still_finish() {
        let track = Track::uniform(["A", "B", "C"], 4, 1);
        let mut engine = ScrollerEngine::new(
            SimulatedViewport::new(track),
            ScrollerOptions { duration: 2.0, num_to_scroll: 1 },
        )
        .unwrap();
        // 1px steps while distance <= 5
        let timeline = run_session(&mut engine, Direction::Backward).unwrap();
        assert_eq!(timeline.steps, 6);
        assert_eq!(engine.state(), ScrollState::Idle);
    }

    #[test]
    fn test_reset_aborts_live_session() {
        let mut engine = engine(5, ScrollerOptions::default());
        engine.forward().unwrap();
        engine.reset().unwrap();
        assert_eq!(engine.state(), ScrollState::Idle);
        assert_eq!(engine.viewport().track().offset(), 0);
        assert_eq!(engine.viewport().pending_timers(), 0);
        assert!(engine.is_navigation_enabled());
        assert_eq!(engine.viewport().track().labels(), labels(&["A", "B", "C", "D", "E"]));
    }

    #[test]
    fn test_forward_never_passes_item_boundary() {
        let mut engine = engine(5, ScrollerOptions::default());
        let timeline = run_session(&mut engine, Direction::Forward).unwrap();
        let lowest = timeline.frames.iter().map(|f| f.offset).min().unwrap();
        assert_eq!(lowest, -(engine.total_move_distance() as i32));
    }

    #[test]
    fn test_offset_overflow_is_a_viewport_error() {
        let mut engine = engine(5, ScrollerOptions::default());
        engine.viewport_mut().set_offset(i32::MIN + 50).unwrap();

        let err = engine.backward().unwrap_err();
        assert!(matches!(err, Error::Viewport(_)));
        // Nothing was pre-staged
        assert_eq!(engine.viewport().track().labels(), labels(&["A", "B", "C", "D", "E"]));
        assert_eq!(engine.state(), ScrollState::Idle);

        engine.reset().unwrap();
        engine.viewport_mut().set_offset(i32::MIN + 3).unwrap();
        let err = engine.forward().unwrap_err();
        assert!(matches!(err, Error::Viewport(_)));
        assert!(!engine.is_navigation_enabled());
        assert_eq!(engine.viewport().pending_timers(), 0);
    }

    /// Viewport that starts failing offset writes after a number of calls,
    /// and can refuse to move items
    struct FlakyViewport {
        inner: SimulatedViewport,
        writes_left: usize,
        moves_fail: bool,
    }

    impl FlakyViewport {
        fn new(labels: &[&str], writes_left: usize) -> Self {
            Self {
                inner: SimulatedViewport::new(Track::uniform(labels.iter().copied(), 100, 5)),
                writes_left,
                moves_fail: false,
            }
        }
    }

    impl Viewport for FlakyViewport {
        fn item_count(&self) -> usize {
            self.inner.item_count()
        }
        fn item_width(&self, index: usize) -> Result<u32> {
            self.inner.item_width(index)
        }
        fn offset(&self) -> Result<i32> {
            self.inner.offset()
        }
        fn set_offset(&mut self, offset: i32) -> Result<()> {
            if self.writes_left == 0 {
                return Err(Error::Viewport("track detached".to_string()));
            }
            self.writes_left -= 1;
            self.inner.set_offset(offset)
        }
        fn set_track_width(&mut self, width: u32) -> Result<()> {
            self.inner.set_track_width(width)
        }
        fn move_item_to_front(&mut self, index: usize) -> Result<()> {
            if self.moves_fail {
                return Err(Error::Viewport("item not found".to_string()));
            }
            self.inner.move_item_to_front(index)
        }
        fn move_item_to_back(&mut self, index: usize) -> Result<()> {
            self.inner.move_item_to_back(index)
        }
        fn schedule_after(&mut self, delay: Duration) -> Result<TimerHandle> {
            self.inner.schedule_after(delay)
        }
        fn cancel(&mut self, handle: TimerHandle) {
            self.inner.cancel(handle)
        }
        fn bind_navigation(&mut self) {
            self.inner.bind_navigation()
        }
        fn unbind_navigation(&mut self) {
            self.inner.unbind_navigation()
        }
    }

    #[test]
    fn test_viewport_error_aborts_and_leaves_navigation_disabled() {
        let viewport = FlakyViewport::new(&["A", "B", "C"], 3);
        let mut engine = ScrollerEngine::new(viewport, ScrollerOptions::default()).unwrap();

        assert!(engine.forward().unwrap());
        let mut failure = None;
        while let Some((handle, _)) = engine.viewport_mut().inner.pop_due() {
            if let Err(e) = engine.on_timer(handle) {
                failure = Some(e);
                break;
            }
        }

        assert!(matches!(failure, Some(Error::Viewport(_))));
        assert_eq!(engine.state(), ScrollState::Idle);
        assert!(!engine.is_navigation_enabled());
        assert_eq!(engine.viewport().inner.pending_timers(), 0);
        assert!(!engine.forward().unwrap());

        engine.viewport_mut().writes_left = usize::MAX;
        engine.reset().unwrap();
        assert!(engine.forward().unwrap());
    }

    #[test]
    fn test_prestage_error_leaves_navigation_disabled() {
        let mut viewport = FlakyViewport::new(&["A", "B", "C"], usize::MAX);
        viewport.moves_fail = true;
        let mut engine = ScrollerEngine::new(viewport, ScrollerOptions::default()).unwrap();

        let err = engine.backward().unwrap_err();
        assert!(matches!(err, Error::Viewport(_)));
        assert_eq!(engine.state(), ScrollState::Idle);
        assert!(engine.session().is_none());
        assert!(!engine.is_navigation_enabled());
        assert!(!engine.viewport().inner.is_navigation_bound());
        assert!(!engine.backward().unwrap());

        engine.viewport_mut().moves_fail = false;
        engine.reset().unwrap();
        assert!(engine.is_navigation_enabled());
        assert!(engine.backward().unwrap());
    }
}
