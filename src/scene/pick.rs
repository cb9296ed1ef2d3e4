//! What the pointer is currently over.

/// A typed hit target on the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickTarget {
    /// Background, or nothing hovered.
    #[default]
    None,
    /// An atom, identified by its index in the current graph.
    Atom(u32),
    /// A bond, identified by its position in the current graph.
    Bond(usize),
}

impl PickTarget {
    /// Returns `true` if this target is `None`.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The atom index, if this target is an atom.
    #[must_use]
    pub fn atom(&self) -> Option<u32> {
        match *self {
            Self::Atom(index) => Some(index),
            _ => None,
        }
    }
}
