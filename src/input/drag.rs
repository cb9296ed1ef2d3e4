//! Drag gesture classification.
//!
//! A pointer session moves `Idle → Armed → Dragging → Idle`. Only once
//! the cursor has travelled further than the threshold from where it was
//! pressed does the session count as a drag; anything shorter ends as a
//! plain click.

use glam::Vec2;

/// Default displacement, in pointer units, a press must exceed to become
/// a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 4.0;

/// Phase of the current pointer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No button held over the view.
    #[default]
    Idle,
    /// Pressed, not yet past the threshold.
    Armed,
    /// Past the threshold; moves rotate the view.
    Dragging,
}

/// How a finished pointer session should treat the click that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Never crossed the threshold: a real click.
    Click,
    /// The tail of a drag: swallowed.
    DragTail,
}

/// Raw state of one pointer session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSession {
    /// A button is held and the session is live.
    pub active: bool,
    /// The threshold has been crossed.
    pub moved: bool,
    /// Where the press happened.
    pub start: Vec2,
    /// Position of the previous applied move.
    pub last: Vec2,
}

/// Classifies pointer sequences and turns drag moves into deltas.
#[derive(Debug, Clone)]
pub struct DragController {
    session: DragSession,
    threshold: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragController {
    /// Create a controller with the given drag threshold.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            session: DragSession::default(),
            threshold,
        }
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Current phase, derived from the session flags.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match (self.session.active, self.session.moved) {
            (false, _) => DragPhase::Idle,
            (true, false) => DragPhase::Armed,
            (true, true) => DragPhase::Dragging,
        }
    }

    /// Whether the "dragging" visual state should be shown.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    /// Press on the view surface. Arms a session only when a molecule is
    /// shown; otherwise the press stays a plain click.
    pub fn pointer_down(&mut self, pos: Vec2, molecule_selected: bool) {
        if !molecule_selected {
            self.session = DragSession::default();
            return;
        }
        self.session = DragSession {
            active: true,
            moved: false,
            start: pos,
            last: pos,
        };
    }

    /// Pointer moved. Returns the delta since the previous applied move
    /// while dragging, `None` otherwise.
    pub fn pointer_move(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.session.active {
            return None;
        }
        if !self.session.moved {
            if pos.distance(self.session.start) <= self.threshold {
                return None;
            }
            self.session.moved = true;
            log::debug!("drag started at {:?}", self.session.start);
        }
        let delta = pos - self.session.last;
        self.session.last = pos;
        Some(delta)
    }

    /// Button released. Ends the session and reports whether the
    /// following click is real or a drag tail.
    pub fn pointer_up(&mut self) -> ClickKind {
        let kind = if self.session.moved {
            ClickKind::DragTail
        } else {
            ClickKind::Click
        };
        self.session = DragSession::default();
        kind
    }

    /// Cursor left the view surface. Ends the session.
    pub fn pointer_leave(&mut self) {
        self.session = DragSession::default();
    }
}
