use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Service", inline)]
#[serde(default)]
/// Where the molecule service lives and how long to wait for it.
pub struct ServiceOptions {
    /// Base URL of the molecule service, without trailing slash.
    #[schemars(title = "Base URL")]
    pub base_url: String,
    /// Give up on a render after this many milliseconds (0 = wait forever).
    #[schemars(title = "Render Timeout (ms)", range(min = 0, max = 120_000))]
    pub render_timeout_ms: u64,
    /// Request molecule statistics whenever a molecule is chosen.
    #[schemars(title = "Fetch Analytics")]
    pub fetch_analytics: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            render_timeout_ms: 10_000,
            fetch_analytics: true,
        }
    }
}

impl ServiceOptions {
    /// Render timeout, or `None` when disabled.
    #[must_use]
    pub fn render_timeout(&self) -> Option<Duration> {
        (self.render_timeout_ms > 0)
            .then(|| Duration::from_millis(self.render_timeout_ms))
    }
}
