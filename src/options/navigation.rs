use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a navigation session is triggered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivationMethod {
    /// Timed activation on the secondary mouse button: a quick tap opens
    /// the context menu, a hold starts navigation.
    RightMouse,
    /// Instant activation on the middle mouse button (no context menu).
    MiddleMouse,
    /// Instant activation on a configurable keyboard key (no context
    /// menu).
    Key,
}

impl ActivationMethod {
    /// Whether this method skips the decision window and starts
    /// navigation at activation. Immediate methods can never open the
    /// context menu.
    #[must_use]
    pub fn is_immediate(self) -> bool {
        !matches!(self, Self::RightMouse)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Decision-window and view-policy parameters.
pub struct NavigationOptions {
    /// How long the trigger must be held before navigation auto-activates,
    /// in seconds. A release before this opens the context menu instead.
    #[schemars(title = "Time Threshold", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub decision_threshold: f32,
    /// After exiting navigation, return the viewport to orthographic view
    /// if that is where it started.
    #[schemars(title = "Return to Orthographic on Exit")]
    pub restore_orthographic: bool,
    /// Allow navigation while looking through a scene camera.
    #[schemars(title = "Enable Navigation in Camera View")]
    pub camera_navigation: bool,
    /// Restrict camera-view navigation to viewports where the camera is
    /// locked to the view.
    #[schemars(title = "Only when Camera is Locked to View")]
    pub camera_navigation_requires_lock: bool,
    /// How a session is triggered.
    #[schemars(title = "Activation Method")]
    pub activation: ActivationMethod,
    /// Physical key for [`ActivationMethod::Key`] (`KeyCode` debug
    /// format).
    #[schemars(skip)]
    pub activation_key: String,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            decision_threshold: 0.1,
            restore_orthographic: true,
            camera_navigation: true,
            camera_navigation_requires_lock: true,
            activation: ActivationMethod::RightMouse,
            activation_key: "KeyF".into(),
        }
    }
}
