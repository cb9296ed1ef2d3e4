//! Input handling: event types, the drag state machine, and the input
//! processor that converts raw pointer events into viewer commands.

/// Drag gesture classification.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;
/// Press/release click classification and cursor tracking.
pub(crate) mod mouse;
/// Converts raw events into viewer commands.
pub mod processor;

pub use drag::{ClickKind, DragController, DragPhase, DragSession};
pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, KeyBindings};
