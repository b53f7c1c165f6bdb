//! Application-Layer: Controller, State, Events und Drag-Sessions.

pub mod command_log;
pub mod controller;
pub mod drag;
pub mod events;
pub mod handlers;
mod intent_mapping;
/// Editor-Zustand
///
/// Hält den geladenen Pfad, Selektion, Drag-Session und Constraint-Solver.
pub mod state;

pub use command_log::CommandLog;
pub use controller::PathController;
pub use drag::{DragSession, DragTarget};
pub use events::{PathCommand, PathIntent};
pub use state::EditorState;
