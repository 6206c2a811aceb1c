pub mod app;
pub mod ui;
pub mod event;

pub use app::{App, View};
pub use event::{Event, EventHandler};
