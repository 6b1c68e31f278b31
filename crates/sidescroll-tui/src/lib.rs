pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod themes;
pub mod ui;
pub mod viewport;
pub mod widgets;

pub use app::App;
pub use themes::load_theme;
pub use viewport::TerminalViewport;
