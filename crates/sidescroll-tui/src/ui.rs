use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::widgets::{HelpWidget, ScrollerWidget, StatusBarWidget};

/// Draw the whole screen: scroller on top, status bar at the bottom, help
/// popup over everything when open
pub fn draw(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    ScrollerWidget::render(frame, layout[0], app);
    StatusBarWidget::render(frame, layout[1], app);

    if app.show_help {
        HelpWidget::render(frame, app);
    }
}
