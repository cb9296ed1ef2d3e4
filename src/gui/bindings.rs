//! Hover and click bindings for the currently displayed graph.
//!
//! Bindings are rebuilt from scratch after every successful render and
//! carry no state across renders except the tooltip offset.

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::scene::{PickTarget, RenderedGraph};

/// A tooltip anchored near the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Identity text of the hovered element.
    pub text: String,
    /// Where to draw it.
    pub position: Vec2,
}

/// Interaction surface of one rendered graph.
#[derive(Debug, Clone, Default)]
pub struct ViewBindings {
    atom_labels: FxHashMap<u32, String>,
    bond_labels: Vec<String>,
    offset: Vec2,
    tooltip: Option<Tooltip>,
}

impl ViewBindings {
    /// Bindings with nothing to hover.
    #[must_use]
    pub fn unbound(offset: Vec2) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    /// Bind every atom and bond of `graph`.
    #[must_use]
    pub fn bind(graph: &RenderedGraph, offset: Vec2) -> Self {
        let atom_labels = graph
            .atoms()
            .iter()
            .map(|a| (a.index, format!("Atom #{}: {}", a.index + 1, a.element)))
            .collect();
        let bond_labels = graph
            .bonds()
            .iter()
            .map(|b| {
                format!("Bond {}-{} (order {})", b.a1 + 1, b.a2 + 1, b.order)
            })
            .collect();
        Self {
            atom_labels,
            bond_labels,
            offset,
            tooltip: None,
        }
    }

    /// Whether any element is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.atom_labels.is_empty()
    }

    /// Current tooltip, if one is showing.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// The cursor is at `pointer` over `target`: show, move or hide the
    /// tooltip.
    pub fn hover(&mut self, target: PickTarget, pointer: Vec2) {
        let text = match target {
            PickTarget::Atom(index) => self.atom_labels.get(&index),
            PickTarget::Bond(position) => self.bond_labels.get(position),
            PickTarget::None => None,
        };
        self.tooltip = text.map(|text| Tooltip {
            text: text.clone(),
            position: pointer + self.offset,
        });
    }

    /// Hide the tooltip.
    pub fn hide(&mut self) {
        self.tooltip = None;
    }
}
