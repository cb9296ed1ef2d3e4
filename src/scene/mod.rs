//! The rendered molecule graph and pointer hit targets.

pub mod graph;
pub mod pick;

pub use graph::{GraphAtom, GraphBond, RenderedGraph};
pub use pick::PickTarget;
