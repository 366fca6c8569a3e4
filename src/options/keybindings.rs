use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Movement-intent keys that fast-path a waiting session into navigation.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format
/// (`"KeyW"`, `"Space"`, `"ArrowUp"`, ...).
pub struct NavKeyOptions {
    /// Keys that count as movement intent.
    pub movement_keys: FxHashSet<String>,
}

impl Default for NavKeyOptions {
    fn default() -> Self {
        let movement_keys = [
            // Standard movement
            "KeyW", "KeyA", "KeyS", "KeyD",
            // Up/down
            "KeyQ", "KeyE", "Space", "ShiftLeft",
            // Arrow-key movement
            "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();

        Self { movement_keys }
    }
}

impl NavKeyOptions {
    /// Whether a key press signals movement intent.
    #[must_use]
    pub fn is_movement_key(&self, key: &str) -> bool {
        self.movement_keys.contains(key)
    }
}
