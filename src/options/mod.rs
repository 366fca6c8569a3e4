//! Centralized controller options with TOML preset support.
//!
//! All tweakable settings (decision timing, view policy, focal-length
//! transition, movement keys) are consolidated here. Options serialize
//! to/from TOML for host-side presets, and the UI-exposed sections
//! publish a JSON Schema for the host's preference panel.
//!
//! A session takes an immutable [`Options`] snapshot at activation;
//! configuration edits never affect a session already in flight.

mod keybindings;
mod lens;
mod navigation;

use std::path::Path;

pub use keybindings::NavKeyOptions;
pub use lens::LensOptions;
pub use navigation::{ActivationMethod, NavigationOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::NavLensError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lens]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Decision-window and view-policy parameters.
    pub navigation: NavigationOptions,
    /// Focal-length transition parameters.
    pub lens: LensOptions,
    /// Movement-intent key set.
    #[schemars(skip)]
    pub keybindings: NavKeyOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// This is the fail-fast configuration boundary: values the runtime
    /// contracts forbid (negative durations or thresholds) are rejected
    /// here, never at session time.
    ///
    /// # Errors
    ///
    /// [`NavLensError::Io`] when the file cannot be read,
    /// [`NavLensError::OptionsParse`] on malformed TOML, and
    /// [`NavLensError::InvalidOptions`] when validation fails.
    pub fn load(path: &Path) -> Result<Self, NavLensError> {
        let content = std::fs::read_to_string(path).map_err(NavLensError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| NavLensError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`NavLensError::OptionsParse`] on serialization failure,
    /// [`NavLensError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), NavLensError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NavLensError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(NavLensError::Io)?;
        }
        std::fs::write(path, content).map_err(NavLensError::Io)
    }

    /// Check the value ranges the runtime contracts depend on.
    ///
    /// # Errors
    ///
    /// [`NavLensError::InvalidOptions`] naming the offending field.
    pub fn validate(&self) -> Result<(), NavLensError> {
        if self.navigation.decision_threshold < 0.0 {
            return Err(NavLensError::InvalidOptions(format!(
                "decision_threshold must be non-negative, got {}",
                self.navigation.decision_threshold
            )));
        }
        if self.lens.transition_duration < 0.0 {
            return Err(NavLensError::InvalidOptions(format!(
                "transition_duration must be non-negative, got {}",
                self.lens.transition_duration
            )));
        }
        if self.lens.target < 0.0 {
            return Err(NavLensError::InvalidOptions(format!(
                "lens target must be non-negative, got {}",
                self.lens.target
            )));
        }
        Ok(())
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

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[lens]
target = 24.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.lens.target, 24.0);
        // Everything else should be default
        assert_eq!(opts.lens.transition_duration, 0.1);
        assert_eq!(opts.navigation.decision_threshold, 0.1);
        assert_eq!(opts.navigation.activation, ActivationMethod::RightMouse);
    }

    #[test]
    fn movement_key_lookup() {
        let opts = Options::default();
        assert!(opts.keybindings.is_movement_key("KeyW"));
        assert!(opts.keybindings.is_movement_key("Space"));
        assert!(opts.keybindings.is_movement_key("ArrowUp"));
        assert!(!opts.keybindings.is_movement_key("KeyZ"));
    }

    #[test]
    fn lens_feature_gate() {
        let mut lens = LensOptions::default();
        assert!(lens.is_active());
        lens.target = 0.0;
        assert!(!lens.is_active());
        lens.target = 30.0;
        lens.enabled = false;
        assert!(!lens.is_active());
    }

    #[test]
    fn validation_rejects_negative_duration() {
        let mut opts = Options::default();
        opts.lens.transition_duration = -0.5;
        assert!(matches!(
            opts.validate(),
            Err(NavLensError::InvalidOptions(_))
        ));
    }

    #[test]
    fn validation_accepts_zero_threshold() {
        // 0 is a documented edge policy, not an error.
        let mut opts = Options::default();
        opts.navigation.decision_threshold = 0.0;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // UI-exposed sections should be present
        assert!(props.contains_key("navigation"));
        assert!(props.contains_key("lens"));

        // Skipped sections should be absent
        assert!(!props.contains_key("keybindings"));

        // Navigation should expose the decision threshold but not the raw
        // activation key string
        let navigation = &props["navigation"]["properties"];
        assert!(navigation.get("decision_threshold").is_some());
        assert!(navigation.get("activation_key").is_none());
    }
}
