use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tooltip", inline)]
#[serde(default)]
/// Hover tooltip placement.
pub struct TooltipOptions {
    /// Horizontal offset from the cursor.
    #[schemars(title = "Offset X", range(min = -64.0, max = 64.0), extend("step" = 1.0))]
    pub offset_x: f32,
    /// Vertical offset from the cursor.
    #[schemars(title = "Offset Y", range(min = -64.0, max = 64.0), extend("step" = 1.0))]
    pub offset_y: f32,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            offset_x: 12.0,
            offset_y: 12.0,
        }
    }
}

impl TooltipOptions {
    /// Offset as a vector.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }
}
