use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::PrimitiveKind;
use crate::scene::{Material, Transform};

/// One editable object in the scene.
///
/// The `id` is opaque to the core; per frame the renderer derives a dense
/// instance index from the visible-object order instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: String,
    pub name: String,
    pub primitive: PrimitiveKind,
    pub transform: Transform,
    pub material: Material,
    pub visible: bool,
}

impl SceneObject {
    /// Creates an object with a fresh id, a default name, and identity
    /// transform.
    #[must_use]
    pub fn new(primitive: PrimitiveKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: primitive.display_name().to_string(),
            primitive,
            transform: Transform::IDENTITY,
            material: Material::default(),
            visible: true,
        }
    }

    /// A copy of this object under a new id, used by duplication.
    #[must_use]
    pub fn duplicated(&self) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: format!("{} Copy", self.name),
            ..self.clone()
        }
    }
}
