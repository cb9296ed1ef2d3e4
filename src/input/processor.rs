//! Converts raw pointer and key events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! drag classification, the target under the press) and the key-binding
//! map. It is the only thing that sits between raw events and
//! [`ViewerEngine::execute`](crate::engine::ViewerEngine::execute).

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::drag::DragController;
use super::event::{InputEvent, MouseButton};
use super::mouse::{ClickResult, InputState};
use crate::engine::command::ViewerCommand;
use crate::options::InputOptions;
use crate::scene::PickTarget;

/// Maps physical key strings to [`ViewerCommand`] variants.
///
/// Key strings use the DOM `KeyboardEvent.code` format: `"KeyR"`,
/// `"Escape"`, etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the parameterless commands that can be key-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Return the view to zero rotation.
    ResetView,
    /// Clear the atom selection.
    Cancel,
}

impl KeyCommandTag {
    fn to_command(self) -> ViewerCommand {
        match self {
            Self::ResetView => ViewerCommand::ResetView,
            Self::Cancel => ViewerCommand::ClearSelection,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyCommandTag::ResetView),
            ("Escape".into(), KeyCommandTag::Cancel),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewerCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw events into [`ViewerCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = processor.handle_event(event, hovered, has_molecule) {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Cursor tracking and press target.
    state: InputState,
    /// Drag threshold state machine.
    drag: DragController,
    /// Whether the primary button is currently held.
    mouse_pressed: bool,
    /// Degrees of rotation per pointer unit.
    rotate_speed: f32,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a processor from input options with default key bindings.
    #[must_use]
    pub fn new(options: &InputOptions) -> Self {
        Self {
            state: InputState::new(),
            drag: DragController::new(options.drag_threshold),
            mouse_pressed: false,
            rotate_speed: options.rotate_speed,
            key_bindings: KeyBindings::default(),
        }
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(
        options: &InputOptions,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            key_bindings,
            ..Self::new(options)
        }
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Whether a drag is in progress (drives the "dragging" visual class).
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Read-only access to the drag state machine.
    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    ///
    /// `hovered` is the target under the cursor; `molecule_selected`
    /// gates whether a press may start a drag.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        hovered: PickTarget,
        molecule_selected: bool,
    ) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => self
                .handle_mouse_button(button, pressed, hovered, molecule_selected),
            InputEvent::CursorLeft => {
                self.drag.pointer_leave();
                self.state.cancel_press();
                self.mouse_pressed = false;
                None
            }
        }
    }

    /// Cursor moved; may produce a rotation command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<ViewerCommand> {
        self.state.handle_mouse_position(x, y);
        let delta = self.drag.pointer_move(Vec2::new(x, y))?;
        let delta = delta * self.rotate_speed;
        Some(ViewerCommand::Rotate {
            dx: f64::from(delta.x),
            dy: f64::from(delta.y),
        })
    }

    /// Mouse button press/release. Tracks state and produces selection commands
    /// on release.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        hovered: PickTarget,
        molecule_selected: bool,
    ) -> Option<ViewerCommand> {
        if button != MouseButton::Left {
            return None;
        }

        if pressed {
            let (x, y) = self.state.mouse_pos;
            self.state.handle_mouse_down(hovered);
            self.drag.pointer_down(Vec2::new(x, y), molecule_selected);
            self.mouse_pressed = true;
            return None;
        }

        // Release only counts if the press happened over the surface
        if !std::mem::replace(&mut self.mouse_pressed, false) {
            self.drag.pointer_leave();
            return None;
        }
        let kind = self.drag.pointer_up();
        match self.state.process_mouse_up(hovered, kind) {
            ClickResult::NoAction => None,
            ClickResult::Atom(index) => Some(ViewerCommand::ClickAtom(index)),
            ClickResult::ClearSelection => Some(ViewerCommand::ClearSelection),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(&InputOptions::default())
    }
}
