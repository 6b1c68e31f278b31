use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use sidescroll_core::{ScrollState, Track};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::theme::Theme;

/// Rows needed to draw an item (top border, label, bottom border)
const ITEM_ROWS: u16 = 3;

/// The visible slice of a track, shifted by the track's offset.
///
/// Column `x` of the area shows track position `x - offset`.
pub struct TrackView<'a> {
    track: &'a Track,
    theme: &'a Theme,
}

impl<'a> TrackView<'a> {
    pub fn new(track: &'a Track, theme: &'a Theme) -> Self {
        Self { track, theme }
    }
}

impl Widget for TrackView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = area.height.min(ITEM_ROWS);
        let item_style = Style::default().fg(self.theme.fg0).bg(self.theme.bg1);
        let labels: Vec<Vec<char>> = self
            .track
            .items()
            .iter()
            .map(|item| fit_label(&item.label, item.width.saturating_sub(2) as usize))
            .collect();

        for x in 0..area.width {
            let position = x as i64 - self.track.offset() as i64;
            let Some((idx, column)) = self.track.item_at(position) else {
                continue;
            };
            let item = &self.track.items()[idx];
            if column < item.margin {
                continue;
            }
            let column = column - item.margin;
            let last = item.width.saturating_sub(1);

            for row in 0..rows {
                let symbol = match (row, column) {
                    (0, 0) => '┌',
                    (0, c) if c == last => '┐',
                    (0, _) => '─',
                    (2, 0) => '└',
                    (2, c) if c == last => '┘',
                    (2, _) => '─',
                    (_, 0) => '│',
                    (_, c) if c == last => '│',
                    (_, c) => labels[idx].get(c as usize - 1).copied().unwrap_or(' '),
                };
                buf.set_string(
                    area.x + x,
                    area.y + row,
                    symbol.to_string(),
                    item_style,
                );
            }
        }
    }
}

/// Center `label` in `width` single-width cells, truncating if needed.
/// Characters that are not one column wide are replaced.
fn fit_label(label: &str, width: usize) -> Vec<char> {
    let chars: Vec<char> = label
        .chars()
        .map(|c| if c.width() == Some(1) { c } else { '·' })
        .take(width)
        .collect();
    let pad = (width - chars.len()) / 2;
    let mut cells = vec![' '; pad];
    cells.extend(chars);
    cells.resize(width, ' ');
    cells
}

pub struct ScrollerWidget;

impl ScrollerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let scroller = &app.config.scroller;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(ITEM_ROWS + 2), // Mask
                Constraint::Length(1),             // Controls
                Constraint::Min(0),
            ])
            .split(area);

        let mask = Block::default()
            .title(format!(" {} ", scroller.mask))
            .title_bottom(Line::from(format!(" {} ", scroller.scroller)).right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey))
            .style(Style::default().bg(theme.bg0));
        let inner = mask.inner(layout[0]);
        frame.render_widget(mask, layout[0]);
        frame.render_widget(TrackView::new(app.track(), theme), inner);

        let live = app.engine.is_navigation_enabled();
        let control_style = if live {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.disabled).add_modifier(Modifier::DIM)
        };

        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(scroller.prev_btn.len() as u16 + 6),
                Constraint::Min(0),
                Constraint::Length(scroller.next_btn.len() as u16 + 6),
            ])
            .split(layout[1]);

        frame.render_widget(
            Paragraph::new(Span::styled(format!("[◀ {}]", scroller.prev_btn), control_style)),
            controls[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(state_label(app.state()), Style::default().fg(theme.grey)))
                .alignment(Alignment::Center),
            controls[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(format!("[{} ▶]", scroller.next_btn), control_style))
                .alignment(Alignment::Right),
            controls[2],
        );
    }
}

fn state_label(state: ScrollState) -> String {
    match state {
        ScrollState::Idle => "idle".to_string(),
        ScrollState::Sliding(direction) => format!("sliding {}", direction),
    }
}
