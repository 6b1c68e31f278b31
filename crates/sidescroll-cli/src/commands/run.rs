use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use sidescroll_core::AppConfig;
use sidescroll_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    load_theme, ui, App,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let theme = load_theme(&config.ui.theme);
    // Build the engine before touching the terminal so setup errors print normally
    let mut app = App::new(config, theme)?;
    info!(items = app.track().len(), "Starting carousel");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let events = EventHandler::new(app.config.ui.tick_rate_ms);

    loop {
        app.fire_due_timers(Instant::now());

        terminal.draw(|frame| ui::draw(frame, app))?;

        let timeout = app.next_wakeup(Instant::now()).unwrap_or(Duration::MAX);
        if let Some(AppEvent::Key(key)) = events.next(timeout)? {
            let action = handle_key_event(key, app);
            app.dispatch(action);
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }
    }
}
