use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use sidescroll_core::ScrollState;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let (mode_str, mode_fg) = match app.state() {
            ScrollState::Idle => ("IDLE".to_string(), theme.success),
            ScrollState::Sliding(direction) => (
                format!("SLIDING {}", direction.to_string().to_uppercase()),
                theme.accent,
            ),
        };

        let status = if let Some(msg) = &app.status_message {
            vec![Span::styled(format!(" {}", msg), Style::default().fg(theme.warning).bg(theme.bg2))]
        } else {
            let distance = app
                .engine
                .session()
                .map(|s| s.distance_moved())
                .unwrap_or(0);
            vec![
                Span::styled(format!(" {}", mode_str), Style::default().fg(mode_fg).bg(theme.bg2)),
                Span::styled(
                    format!(
                        " | offset {} | moved {}/{} | order: {}",
                        app.track().offset(),
                        distance,
                        app.engine.total_move_distance(),
                        app.track().labels().join(" ")
                    ),
                    Style::default().fg(theme.fg1).bg(theme.bg2),
                ),
            ]
        };
        let status_len: usize = status.iter().map(|span| span.content.chars().count()).sum();

        let keys = &app.config.keymap;
        let help_hint = format!(
            " {}:prev {}:next {}:reset {}:help {}:quit ",
            keys.prev, keys.next, keys.reset, keys.help, keys.quit
        );
        let padding_len = area
            .width
            .saturating_sub(status_len as u16 + help_hint.chars().count() as u16)
            as usize;

        let mut spans = status;
        spans.push(Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)));
        spans.push(Span::styled(help_hint, Style::default().fg(theme.grey).bg(theme.bg2)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
