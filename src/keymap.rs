//! Save/restore pairing for temporarily overridden host key bindings.
//!
//! While the controller is active it rewrites a handful of host bindings
//! (e.g. disabling the default menu on the trigger button, rerouting the
//! navigation-confirm binding). The [`KeymapCoordinator`] captures the
//! prior state of every touched binding before applying overrides and
//! reapplies it exactly on restore. The pairing is idempotent in both
//! directions so an abnormal session teardown can call `restore`
//! unconditionally.
//!
//! The binding storage itself is host-defined behind [`BindingRegistry`];
//! this module only owns the snapshot discipline.

use rustc_hash::FxHashMap;

/// Identifies one binding item within one host keymap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingId {
    /// Host keymap the item lives in (e.g. `"3d_view"`).
    pub keymap: String,
    /// Item identifier within that keymap.
    pub item: String,
}

impl BindingId {
    /// Convenience constructor.
    #[must_use]
    pub fn new(keymap: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            keymap: keymap.into(),
            item: item.into(),
        }
    }
}

/// The capturable state of one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingState {
    /// Whether the binding currently fires.
    pub active: bool,
    /// Physical key string (`KeyCode` debug format).
    pub key: String,
    /// Bound action value.
    pub value: String,
}

/// One override a session wants applied while it is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingOverride {
    /// Which binding to override.
    pub id: BindingId,
    /// State to apply for the session's lifetime.
    pub state: BindingState,
}

/// Host-side binding storage the coordinator reads and writes through.
pub trait BindingRegistry {
    /// Current state of a binding, or `None` if the host doesn't have it.
    fn binding(&self, id: &BindingId) -> Option<BindingState>;

    /// Overwrite the state of a binding.
    fn set_binding(&mut self, id: &BindingId, state: &BindingState);
}

/// Opaque snapshot of pre-suspend binding state.
#[derive(Debug)]
struct SavedKeymap {
    entries: FxHashMap<BindingId, BindingState>,
}

/// Applies binding overrides for a session and guarantees their exact,
/// exactly-once reversal.
#[derive(Debug, Default)]
pub struct KeymapCoordinator {
    saved: Option<SavedKeymap>,
}

impl KeymapCoordinator {
    /// Create a coordinator with nothing suspended.
    #[must_use]
    pub fn new() -> Self {
        Self { saved: None }
    }

    /// Whether a snapshot is currently held.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.saved.is_some()
    }

    /// Capture the current state of every overridden binding, then apply
    /// the overrides.
    ///
    /// Refused (with a warning) when a snapshot is already held: the
    /// suspend/restore pairing stays exactly 1:1. Bindings the host does
    /// not know are skipped.
    pub fn suspend<R: BindingRegistry>(
        &mut self,
        registry: &mut R,
        overrides: &[BindingOverride],
    ) {
        if self.saved.is_some() {
            log::warn!("keymap suspend refused: bindings already suspended");
            return;
        }

        let mut entries = FxHashMap::default();
        for o in overrides {
            let Some(current) = registry.binding(&o.id) else {
                log::debug!(
                    "binding {}/{} not present in host, skipping",
                    o.id.keymap,
                    o.id.item
                );
                continue;
            };
            let _ = entries.insert(o.id.clone(), current);
            registry.set_binding(&o.id, &o.state);
        }

        log::debug!("suspended {} host bindings", entries.len());
        self.saved = Some(SavedKeymap { entries });
    }

    /// Reapply the captured state and drop the snapshot.
    ///
    /// Idempotent: calling this twice, or with nothing suspended, is a
    /// no-op.
    pub fn restore<R: BindingRegistry>(&mut self, registry: &mut R) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        for (id, state) in &saved.entries {
            registry.set_binding(id, state);
        }
        log::debug!("restored {} host bindings", saved.entries.len());
    }

    /// Re-apply a new override set: restore what is held, then suspend
    /// with `overrides`.
    ///
    /// The host calls this synchronously after a configuration write that
    /// changes which bindings must be overridden; the controller never
    /// observes configuration changes on its own.
    pub fn reconfigure<R: BindingRegistry>(
        &mut self,
        registry: &mut R,
        overrides: &[BindingOverride],
    ) {
        self.restore(registry);
        self.suspend(registry, overrides);
    }
}
