use serde::{Deserialize, Serialize};

/// Which manipulation the gizmo currently offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoMode {
    Translate,
    Rotate,
    Scale,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

/// Gizmo state the overlay pass reads each frame. Picking and drag math
/// live outside the core; the renderer only needs mode and axis
/// highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GizmoState {
    pub mode: GizmoMode,
    pub hovered_axis: Option<GizmoAxis>,
    pub active_axis: Option<GizmoAxis>,
}
