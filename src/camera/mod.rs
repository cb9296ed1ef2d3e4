//! View orientation state.

pub mod rotation;

pub use rotation::RotationState;
