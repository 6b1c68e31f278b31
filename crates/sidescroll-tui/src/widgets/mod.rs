mod help;
mod scroller;
mod status_bar;

pub use help::HelpWidget;
pub use scroller::{ScrollerWidget, TrackView};
pub use status_bar::StatusBarWidget;
