pub mod app;
pub mod ui;
pub mod event;

pub use app::{App, AppAction};
pub use event::{Event, EventHandler};
