use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Focal Length", inline)]
#[serde(default)]
/// Focal-length transition parameters for navigation sessions.
pub struct LensOptions {
    /// Switch the viewport focal length while navigation is active.
    #[schemars(title = "Switch Focal Length while Active")]
    pub enabled: bool,
    /// Focal length the viewport animates to during navigation, in
    /// millimeters.
    #[schemars(title = "Focal Length", range(min = 0.0, max = 250.0), extend("step" = 1.0))]
    pub target: f32,
    /// Duration of the focal-length transition in seconds (0 = instant).
    #[schemars(title = "Transition Duration", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub transition_duration: f32,
}

impl LensOptions {
    /// Whether sessions should drive the focal length at all.
    ///
    /// A zero target disables the feature even when `enabled` is set, so
    /// a half-filled preset cannot animate toward a nonsense value.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && self.target > 0.0
    }
}

impl Default for LensOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            target: 30.0,
            transition_duration: 0.1,
        }
    }
}
