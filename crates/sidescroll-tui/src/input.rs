use crossterm::event::KeyEvent;

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Scroll backward
    Prev,
    /// Scroll forward
    Next,
    /// Abort the live session and re-enable navigation
    Reset,
    ToggleHelp,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    let action = app.keymap.lookup(&key).copied();

    // While help is open, everything except quit closes it
    if app.show_help {
        return match action {
            Some(Action::Quit) => Action::Quit,
            _ => Action::ToggleHelp,
        };
    }

    action.unwrap_or(Action::None)
}
