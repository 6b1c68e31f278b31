//! Per-navigation session state and the pure tick function
//!
//! A session is created when a navigation action is accepted and dropped when
//! it finishes. [`ScrollSession::advance`] performs one tick of bookkeeping and
//! reports what the engine should do with the viewport; it never touches the
//! viewport itself.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::timing::step_delay;
use crate::viewport::TimerHandle;

/// Direction of a navigation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Reveal the next items; the strip moves left
    Forward,
    /// Reveal the previous items; the strip moves right
    Backward,
}

impl Direction {
    /// Sign applied to the offset on every step (+1 backward, -1 forward)
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => -1,
            Direction::Backward => 1,
        }
    }

    /// Whether a session in this direction takes another step.
    ///
    /// Forward slides from the origin and stops once the target distance is
    /// reached. Backward starts from its pre-staged position and takes one more
    /// step at exactly the target distance.
    #[inline]
    pub fn continues(self, distance_moved: u32, total_move_distance: u32) -> bool {
        match self {
            Direction::Forward => distance_moved < total_move_distance,
            Direction::Backward => distance_moved <= total_move_distance,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" | "next" | "f" => Ok(Direction::Forward),
            "backward" | "prev" | "previous" | "b" => Ok(Direction::Backward),
            other => Err(format!("unknown direction '{}', expected forward or backward", other)),
        }
    }
}

/// Fixed parameters shared by every session of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPlan {
    pub total_move_distance: u32,
    pub tick_interval: Duration,
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The strip moved by `delta`; the next tick is due after `next_delay`
    Moved { delta: i32, next_delay: Duration },
    /// The session reached its target and must be finalized
    Finished,
}

/// State of one navigation action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSession {
    direction: Direction,
    /// Offset the track had when navigation fired
    origin: i32,
    distance_moved: u32,
    increment: u32,
    speed_multiplier: u32,
    timer: Option<TimerHandle>,
}

impl ScrollSession {
    pub fn new(direction: Direction, origin: i32, increment: u32) -> Self {
        Self {
            direction,
            origin,
            distance_moved: 0,
            increment,
            speed_multiplier: 0,
            timer: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn origin(&self) -> i32 {
        self.origin
    }

    pub fn distance_moved(&self) -> u32 {
        self.distance_moved
    }

    pub fn increment(&self) -> u32 {
        self.increment
    }

    pub fn speed_multiplier(&self) -> u32 {
        self.speed_multiplier
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub(crate) fn set_timer(&mut self, timer: Option<TimerHandle>) {
        self.timer = timer;
    }

    /// Advance the session by one tick
    pub fn advance(&mut self, plan: &SessionPlan) -> Tick {
        if !self
            .direction
            .continues(self.distance_moved, plan.total_move_distance)
        {
            return Tick::Finished;
        }

        self.distance_moved += self.increment;
        self.speed_multiplier += 1;

        Tick::Moved {
            delta: self.increment as i32 * self.direction.sign(),
            next_delay: step_delay(plan.tick_interval, self.speed_multiplier),
        }
    }
}
