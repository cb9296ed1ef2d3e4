//! Per-element highlight classes derived from the current selection.

use rustc_hash::FxHashMap;

use crate::scene::RenderedGraph;

/// Visual class applied to an atom or bond while an atom is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    /// The selected atom itself.
    Selected,
    /// An atom bonded to the selected atom.
    Neighbor,
    /// A bond touching the selected atom.
    Connected,
    /// Everything else.
    Dimmed,
}

impl HighlightClass {
    /// Class name used by presentation layers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Neighbor => "neighbor",
            Self::Connected => "connected",
            Self::Dimmed => "dimmed",
        }
    }
}

/// Highlight classes for one graph. Empty means no highlighting at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    atoms: FxHashMap<u32, HighlightClass>,
    bonds: FxHashMap<usize, HighlightClass>,
}

impl Highlights {
    /// Classify every atom and bond of `graph` around `selected`.
    ///
    /// Returns the classes together with the sorted neighbor set.
    #[must_use]
    pub fn derive(graph: &RenderedGraph, selected: u32) -> (Self, Vec<u32>) {
        let neighbors = graph.neighbors(selected);

        let mut atoms = FxHashMap::default();
        for atom in graph.atoms() {
            let class = if atom.index == selected {
                HighlightClass::Selected
            } else if neighbors.binary_search(&atom.index).is_ok() {
                HighlightClass::Neighbor
            } else {
                HighlightClass::Dimmed
            };
            let _ = atoms.insert(atom.index, class);
        }

        let bonds = graph
            .bonds()
            .iter()
            .enumerate()
            .map(|(pos, bond)| {
                let class = if bond.touches(selected) {
                    HighlightClass::Connected
                } else {
                    HighlightClass::Dimmed
                };
                (pos, class)
            })
            .collect();

        (Self { atoms, bonds }, neighbors)
    }

    /// Class of the atom with this index, if any.
    #[must_use]
    pub fn atom_class(&self, index: u32) -> Option<HighlightClass> {
        self.atoms.get(&index).copied()
    }

    /// Class of the bond at this position, if any.
    #[must_use]
    pub fn bond_class(&self, position: usize) -> Option<HighlightClass> {
        self.bonds.get(&position).copied()
    }

    /// Whether no element carries a class.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    /// Remove every class.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.bonds.clear();
    }
}
