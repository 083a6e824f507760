pub mod app;
pub mod event;
pub mod input;
pub mod page;
pub mod scroll;
pub mod theme;
pub mod themes;
pub mod transition;
pub mod widgets;

pub use app::{App, Command};
pub use theme::Theme;
pub use themes::load_theme;
