use crate::scene::PickTarget;

use super::drag::ClickKind;

/// What a finished press/release pair means for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    /// No selection action (drag tail, bond click).
    NoAction,
    /// Plain click on an atom.
    Atom(u32),
    /// Plain click on background; clears the selection.
    ClearSelection,
}

/// Tracks the cursor position and what was under it at press time.
pub struct InputState {
    pub mouse_pos: (f32, f32),
    pub mouse_down_target: PickTarget,
}

impl InputState {
    /// Create a new input state with no active press.
    pub fn new() -> Self {
        Self {
            mouse_pos: (0.0, 0.0),
            mouse_down_target: PickTarget::None,
        }
    }

    /// Record what (if anything) is under the cursor at mouse-down.
    pub fn handle_mouse_down(&mut self, hovered: PickTarget) {
        self.mouse_down_target = hovered;
    }

    /// Update cursor position.
    pub fn handle_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_pos = (x, y);
    }

    /// Forget the pending press (cursor left the surface).
    pub fn cancel_press(&mut self) {
        self.mouse_down_target = PickTarget::None;
    }

    /// Classify a mouse-up given the target under the cursor and how the
    /// drag controller ended the session.
    pub fn process_mouse_up(
        &mut self,
        hovered: PickTarget,
        kind: ClickKind,
    ) -> ClickResult {
        let down = self.mouse_down_target;
        self.mouse_down_target = PickTarget::None;

        if kind == ClickKind::DragTail {
            return ClickResult::NoAction;
        }

        // Press and release on different targets lands on the background
        if down != hovered || hovered.is_none() {
            return ClickResult::ClearSelection;
        }
        hovered.atom().map_or(ClickResult::NoAction, ClickResult::Atom)
    }
}
