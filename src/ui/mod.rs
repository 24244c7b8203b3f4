//! Interactive terminal front end.

mod app;
mod editor;
mod view;

pub use app::run;
