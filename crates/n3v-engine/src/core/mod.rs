//! Contract between the runtime loop and the hosting application.

mod app;

pub use app::{App, AppControl};
