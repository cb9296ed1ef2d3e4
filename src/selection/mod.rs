//! Single-atom selection and neighborhood highlighting.
//!
//! The controller interprets clicks against the current [`RenderedGraph`]
//! and keeps the highlight classes and status line in step with the
//! selection. Whether a click counts as a click (rather than the tail of
//! a drag) is decided upstream by the drag controller.

mod highlight;

pub use highlight::{HighlightClass, Highlights};

use crate::scene::RenderedGraph;

/// Status line shown while nothing is selected.
pub const DEFAULT_GUIDANCE: &str = "Click an atom to highlight its neighbors";

/// Selection state over the current graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No atom selected.
    #[default]
    Unselected,
    /// The atom with this index is selected.
    Selected(u32),
}

/// Owns the selection, its highlight classes, and the status line.
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    highlights: Highlights,
    neighbors: Vec<u32>,
    status: String,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    /// Start unselected with the default guidance text.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SelectionState::Unselected,
            highlights: Highlights::default(),
            neighbors: Vec::new(),
            status: DEFAULT_GUIDANCE.to_owned(),
        }
    }

    /// Current selection.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Index of the selected atom, if any.
    #[must_use]
    pub fn selected(&self) -> Option<u32> {
        match self.state {
            SelectionState::Selected(index) => Some(index),
            SelectionState::Unselected => None,
        }
    }

    /// Highlight classes for the current graph.
    #[must_use]
    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Sorted neighbor set of the selected atom.
    #[must_use]
    pub fn neighbors(&self) -> &[u32] {
        &self.neighbors
    }

    /// One-line summary or guidance text.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// A plain click on an atom: toggle it off if already selected,
    /// otherwise select it.
    pub fn click_atom(&mut self, index: u32, graph: &RenderedGraph) {
        if self.state == SelectionState::Selected(index) {
            self.clear();
        } else {
            self.select(index, graph);
        }
    }

    /// A plain click on empty background.
    pub fn click_background(&mut self) {
        self.clear();
    }

    /// Drop the selection and every highlight class. Used for molecule
    /// changes, view resets and render failures.
    pub fn clear(&mut self) {
        self.state = SelectionState::Unselected;
        self.highlights.clear();
        self.neighbors.clear();
        DEFAULT_GUIDANCE.clone_into(&mut self.status);
    }

    /// Re-apply the current selection to a freshly rendered graph.
    ///
    /// If the selected index no longer exists the selection is dropped.
    pub fn reapply(&mut self, graph: &RenderedGraph) {
        match self.state {
            SelectionState::Selected(index) if graph.contains(index) => {
                self.select(index, graph);
            }
            SelectionState::Selected(index) => {
                log::debug!("selected atom {index} missing from new graph");
                self.clear();
            }
            SelectionState::Unselected => self.clear(),
        }
    }

    fn select(&mut self, index: u32, graph: &RenderedGraph) {
        let Some(atom) = graph.atom(index) else {
            self.clear();
            return;
        };
        let (highlights, neighbors) = Highlights::derive(graph, index);
        self.status = summary(index, &atom.element, neighbors.len());
        self.state = SelectionState::Selected(index);
        self.highlights = highlights;
        self.neighbors = neighbors;
    }
}

fn summary(index: u32, element: &str, neighbor_count: usize) -> String {
    let noun = if neighbor_count == 1 { "neighbor" } else { "neighbors" };
    format!("Atom #{} ({element}) - {neighbor_count} {noun}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::graph::tests::{atom, bond, chain};

    #[test]
    fn selecting_middle_atom_marks_neighborhood() {
        let graph = chain();
        let mut sel = SelectionController::new();
        sel.click_atom(1, &graph);

        assert_eq!(sel.state(), SelectionState::Selected(1));
        assert_eq!(sel.neighbors(), &[0, 2]);
        let hl = sel.highlights();
        assert_eq!(hl.atom_class(1), Some(HighlightClass::Selected));
        assert_eq!(hl.atom_class(0), Some(HighlightClass::Neighbor));
        assert_eq!(hl.atom_class(2), Some(HighlightClass::Neighbor));
        assert_eq!(hl.bond_class(0), Some(HighlightClass::Connected));
        assert_eq!(hl.bond_class(1), Some(HighlightClass::Connected));
        assert_eq!(sel.status(), "Atom #2 (C) - 2 neighbors");
    }

    #[test]
    fn unrelated_elements_are_dimmed() {
        let graph = chain();
        let mut sel = SelectionController::new();
        sel.click_atom(0, &graph);

        let hl = sel.highlights();
        assert_eq!(hl.atom_class(1), Some(HighlightClass::Neighbor));
        assert_eq!(hl.atom_class(2), Some(HighlightClass::Dimmed));
        assert_eq!(hl.bond_class(1), Some(HighlightClass::Dimmed));
        assert_eq!(sel.status(), "Atom #1 (C) - 1 neighbor");
    }

    #[test]
    fn clicking_selected_atom_toggles_off() {
        let graph = chain();
        let mut sel = SelectionController::new();
        sel.click_atom(2, &graph);
        sel.click_atom(2, &graph);
        assert_eq!(sel.state(), SelectionState::Unselected);
        assert!(sel.highlights().is_clear());
        assert_eq!(sel.status(), DEFAULT_GUIDANCE);
    }

    #[test]
    fn clicking_another_atom_moves_selection() {
        let graph = chain();
        let mut sel = SelectionController::new();
        sel.click_atom(0, &graph);
        sel.click_atom(2, &graph);
        assert_eq!(sel.selected(), Some(2));
        assert_eq!(sel.neighbors(), &[1]);
    }

    #[test]
    fn background_click_clears() {
        let graph = chain();
        let mut sel = SelectionController::new();
        sel.click_atom(1, &graph);
        sel.click_background();
        assert_eq!(sel.selected(), None);
        assert!(sel.highlights().is_clear());
    }

    #[test]
    fn selection_survives_compatible_rerender() {
        let mut sel = SelectionController::new();
        sel.click_atom(2, &chain());

        let next = RenderedGraph::new(
            String::new(),
            vec![atom(0, "C"), atom(1, "C"), atom(2, "O"), atom(3, "H")],
            vec![bond(1, 2, 2), bond(2, 3, 1)],
        );
        sel.reapply(&next);

        assert_eq!(sel.selected(), Some(2));
        assert_eq!(sel.neighbors(), &[1, 3]);
        assert_eq!(sel.highlights().atom_class(3), Some(HighlightClass::Neighbor));
        assert_eq!(sel.highlights().atom_class(0), Some(HighlightClass::Dimmed));
    }

    #[test]
    fn selection_drops_on_incompatible_rerender() {
        let mut sel = SelectionController::new();
        sel.click_atom(2, &chain());

        let next = RenderedGraph::new(
            String::new(),
            vec![atom(0, "C"), atom(1, "C")],
            vec![bond(0, 1, 1)],
        );
        sel.reapply(&next);

        assert_eq!(sel.state(), SelectionState::Unselected);
        assert!(sel.highlights().is_clear());
        assert_eq!(sel.status(), DEFAULT_GUIDANCE);
    }

    #[test]
    fn clicking_missing_atom_leaves_unselected() {
        let mut sel = SelectionController::new();
        sel.click_atom(9, &chain());
        assert_eq!(sel.state(), SelectionState::Unselected);
    }
}
