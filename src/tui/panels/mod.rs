//! Panel rendering and input handling.

mod pet;
mod todo;
mod visualizer;

pub use pet::PetPanel;
pub use todo::{TodoList, TodoMode};
pub use visualizer::VisualizerView;
