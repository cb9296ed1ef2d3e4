//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation is represented as a `ViewerCommand`, be it
//! from pointer input or a direct call. Consumers construct commands and
//! pass them to [`ViewerEngine::execute`](super::ViewerEngine::execute).

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(ViewerCommand::SelectMolecule("Caffeine".into()));
/// engine.execute(ViewerCommand::Rotate { dx: 5.0, dy: 0.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    // ── Molecule ────────────────────────────────────────────────────
    /// Show a molecule, unrotated.
    SelectMolecule(String),

    /// Show nothing.
    ClearMolecule,

    // ── View ────────────────────────────────────────────────────────
    /// Return to zero rotation and drop the atom selection.
    ResetView,

    /// Rotate by a drag delta, in degrees.
    Rotate {
        /// Horizontal delta; yaws the view.
        dx: f64,
        /// Vertical delta; pitches the view.
        dy: f64,
    },

    // ── Selection ───────────────────────────────────────────────────
    /// Plain click on an atom.
    ClickAtom(u32),

    /// Clear the atom selection (background click, Escape).
    ClearSelection,
}
