use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::input::drag::DEFAULT_DRAG_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Pointer gesture parameters.
pub struct InputOptions {
    /// Distance a press must travel before it counts as a drag.
    #[schemars(title = "Drag Threshold", range(min = 0.0, max = 32.0), extend("step" = 0.5))]
    pub drag_threshold: f32,
    /// Degrees of rotation per pointer unit dragged.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            rotate_speed: 1.0,
        }
    }
}
