//! Fixed mapping from the host's interaction mode to a context-menu
//! identifier.
//!
//! The session defers the menu until final cleanup; at that point it asks
//! the host for its current [`InteractionMode`] and resolves the menu
//! identifier through [`context_menu`]. Unrecognized modes fall back to
//! [`FALLBACK_MENU`] rather than failing.

use serde::{Deserialize, Serialize};

/// Menu shown when the host reports a mode without a dedicated menu.
pub const FALLBACK_MENU: &str = "context_menu.object";

/// Interaction modes of the host application that carry a context menu.
///
/// Serde serializes as `snake_case` strings so the values stay readable in
/// host-side logs and presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Object manipulation mode.
    Object,
    /// Mesh editing.
    EditMesh,
    /// Surface editing.
    EditSurface,
    /// Text object editing.
    EditText,
    /// Armature editing.
    EditArmature,
    /// Curve editing.
    EditCurve,
    /// Metaball editing.
    EditMetaball,
    /// Lattice editing.
    EditLattice,
    /// Pose mode.
    Pose,
    /// Vertex paint mode.
    PaintVertex,
    /// Weight paint mode.
    PaintWeight,
    /// Texture paint mode.
    PaintTexture,
    /// Sculpt mode.
    Sculpt,
    /// Any mode without a dedicated menu.
    Other,
}

/// Resolve the context-menu identifier for an interaction mode.
#[must_use]
pub fn context_menu(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Object => "context_menu.object",
        InteractionMode::EditMesh => "context_menu.edit_mesh",
        InteractionMode::EditSurface => "context_menu.edit_surface",
        InteractionMode::EditText => "context_menu.edit_text",
        InteractionMode::EditArmature => "context_menu.edit_armature",
        InteractionMode::EditCurve => "context_menu.edit_curve",
        InteractionMode::EditMetaball => "context_menu.edit_metaball",
        InteractionMode::EditLattice => "context_menu.edit_lattice",
        InteractionMode::Pose => "context_menu.pose",
        InteractionMode::PaintVertex => "context_menu.paint_vertex",
        InteractionMode::PaintWeight => "context_menu.paint_weight",
        InteractionMode::PaintTexture => "context_menu.paint_texture",
        InteractionMode::Sculpt => "context_menu.sculpt",
        InteractionMode::Other => FALLBACK_MENU,
    }
}
