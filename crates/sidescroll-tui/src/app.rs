use std::sync::Arc;
use std::time::{Duration, Instant};

use sidescroll_core::{AppConfig, ScrollState, ScrollerEngine, Track};
use tracing::{error, info};

use crate::input::Action;
use crate::keymap::Keymap;
use crate::theme::Theme;
use crate::viewport::TerminalViewport;

pub struct App {
    pub engine: ScrollerEngine<TerminalViewport>,
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    /// Build the track from the configured items and start the engine
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> sidescroll_core::Result<Self> {
        let track = Track::uniform(
            config.items.iter().cloned(),
            config.ui.item_width,
            config.ui.item_margin,
        );
        let engine = ScrollerEngine::new(
            TerminalViewport::new(track),
            config.scroller.options(),
        )?;
        let keymap = Keymap::from_config(&config.keymap);

        Ok(Self {
            engine,
            config,
            theme,
            keymap,
            show_help: false,
            should_quit: false,
            status_message: None,
        })
    }

    pub fn track(&self) -> &Track {
        self.engine.viewport().track()
    }

    pub fn state(&self) -> ScrollState {
        self.engine.state()
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Prev => {
                let result = self.engine.backward();
                self.report_navigation(result);
            }
            Action::Next => {
                let result = self.engine.forward();
                self.report_navigation(result);
            }
            Action::Reset => match self.engine.reset() {
                Ok(()) => {
                    info!("Scroller reset");
                    self.status_message = Some("Scroller reset".to_string());
                }
                Err(e) => self.report_error(e),
            },
            Action::None => {}
        }
    }

    /// Forward every timer that expired by `now` to the engine.
    /// Returns how many were delivered.
    pub fn fire_due_timers(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(handle) = self.engine.viewport_mut().take_due(now) {
            fired += 1;
            if let Err(e) = self.engine.on_timer(handle) {
                self.report_error(e);
                break;
            }
        }
        fired
    }

    /// Time until the next scroll timer is due, if one is pending
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.engine
            .viewport()
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    fn report_navigation(&mut self, result: sidescroll_core::Result<bool>) {
        match result {
            Ok(true) => self.status_message = None,
            Ok(false) => self.status_message = Some("Busy: scroll in progress".to_string()),
            Err(e) => self.report_error(e),
        }
    }

    fn report_error(&mut self, e: sidescroll_core::Error) {
        error!("Scroller error: {}", e);
        self.status_message = Some(format!("Error: {} (press reset to recover)", e));
    }
}
