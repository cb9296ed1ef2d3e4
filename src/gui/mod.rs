//! Presentation models fed by the engine: hover bindings for the current
//! graph and the statistics panel.

/// Hover and click bindings, rebuilt per render.
pub mod bindings;
/// Molecule statistics panel.
pub mod stats;

pub use bindings::{Tooltip, ViewBindings};
pub use stats::{StatsFields, StatsPanel, StatsState};
