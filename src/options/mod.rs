//! Centralized viewer options with TOML preset support.
//!
//! Every tweakable setting (gesture thresholds, service endpoint and
//! timeout, tooltip placement, key bindings) lives here. Options
//! serialize to/from TOML so a viewer can be configured from a file.

mod input;
mod service;
mod tooltip;

use std::path::Path;

pub use input::InputOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use service::ServiceOptions;
pub use tooltip::TooltipOptions;

use crate::error::ViewerError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[service]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Pointer gesture parameters.
    pub input: InputOptions,
    /// Molecule service endpoint and timeouts.
    pub service: ServiceOptions,
    /// Hover tooltip placement.
    pub tooltip: TooltipOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file cannot be read and
    /// [`ViewerError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] if serialization fails and
    /// [`ViewerError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ViewerCommand;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[service]
base_url = "http://molecules.test:9000"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.service.base_url, "http://molecules.test:9000");
        // Everything else should be default
        assert_eq!(opts.service.render_timeout_ms, 10_000);
        assert_eq!(opts.input.drag_threshold, 4.0);
        assert_eq!(opts.tooltip.offset_x, 12.0);
    }

    #[test]
    fn zero_timeout_disables_it() {
        let opts: Options = toml::from_str("[service]\nrender_timeout_ms = 0\n").unwrap();
        assert_eq!(opts.service.render_timeout(), None);
        assert!(ServiceOptions::default().render_timeout().is_some());
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyR"), Some(ViewerCommand::ResetView));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = std::env::temp_dir().join(format!("molview-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.input.rotate_speed = 0.25;
        opts.save(&dir.join("slow.toml")).unwrap();

        let loaded = Options::load(&dir.join("slow.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["slow".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("input"));
        assert!(props.contains_key("service"));
        assert!(props.contains_key("tooltip"));
        assert!(!props.contains_key("keybindings"));

        let input = &props["input"]["properties"];
        assert!(input.get("drag_threshold").is_some());
        assert!(input.get("rotate_speed").is_some());
    }
}
