//! Terminal UI: the pet, a todo list, and the audio visualizer.

mod app;
mod panels;
mod theme;

pub use app::run;
