//! The scene kernel: an ordered object list driven by commands, with a
//! monotonic version the renderer uses for change detection.
//!
//! The renderer never subscribes to anything; it pulls a
//! [`SceneSnapshot`] each frame and compares `version` /
//! `render_epoch` against what it saw last frame. Any mutation, however
//! small, bumps `version`, which in turn invalidates accumulation.

use glam::Vec3;
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::geometry::PrimitiveKind;
use crate::scene::transform::MIN_SCALE;
use crate::scene::{Material, SceneObject, Transform};

/// Background preset names accepted by the scene layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPreset {
    Day,
    Dusk,
    Night,
}

/// The preset palette, `0xRRGGBB` each. The exact values are
/// configuration, not contract; replace the palette wholesale to retheme
/// the presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundPalette {
    pub day: u32,
    pub dusk: u32,
    pub night: u32,
}

impl Default for BackgroundPalette {
    fn default() -> Self {
        Self {
            day: 0x0087_CEEB,
            dusk: 0x00FD_9E63,
            night: 0x000B_1026,
        }
    }
}

impl BackgroundPalette {
    #[must_use]
    pub fn color_for(&self, preset: BackgroundPreset) -> u32 {
        match preset {
            BackgroundPreset::Day => self.day,
            BackgroundPreset::Dusk => self.dusk,
            BackgroundPreset::Night => self.night,
        }
    }
}

/// Mutations accepted by the scene kernel.
#[derive(Debug, Clone)]
pub enum SceneCommand {
    AddObject { primitive: PrimitiveKind },
    RemoveObject { id: String },
    RenameObject { id: String, name: String },
    SetVisibility { id: String, visible: bool },
    DuplicateObject { id: String },
    SetSelection { id: Option<String> },
    UpdateTransform { id: String, transform: Transform },
    UpdateMaterial { id: String, material: Material },
    SetBackground { color: u32 },
    SetBackgroundPreset { preset: BackgroundPreset },
}

/// A read-only copy of the scene consumed once per frame.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub objects: Vec<SceneObject>,
    pub background: u32,
    pub selected: Option<String>,
    pub version: u64,
    pub render_epoch: u64,
}

/// On-disk scene document.
#[derive(Serialize, Deserialize)]
struct SceneDocument {
    objects: Vec<SceneObject>,
    background: u32,
    selected: Option<String>,
}

/// The editable scene: an ordered object list, a selection, and a
/// background color, mutated exclusively through [`SceneCommand`]s.
///
/// # Example
///
/// ```rust,ignore
/// use lumen::{PrimitiveKind, SceneCommand, SceneStore};
///
/// let mut store = SceneStore::new();
/// let id = store
///     .apply(SceneCommand::AddObject { primitive: PrimitiveKind::Sphere })
///     .unwrap();
/// store.apply(SceneCommand::SetSelection { id: Some(id) });
///
/// // The renderer consumes a read-only copy once per frame and reacts
/// // to the version counter.
/// let snapshot = store.snapshot();
/// renderer.render_frame(&snapshot, &camera, &gizmo)?;
/// ```
pub struct SceneStore {
    objects: Vec<SceneObject>,
    index: FxHashMap<String, usize>,
    selected: Option<String>,
    background: u32,
    palette: BackgroundPalette,
    version: u64,
    render_epoch: u64,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    #[must_use]
    pub fn new() -> Self {
        let palette = BackgroundPalette::default();
        Self {
            objects: Vec::new(),
            index: FxHashMap::default(),
            selected: None,
            background: palette.day,
            palette,
            version: 0,
            render_epoch: 0,
        }
    }

    #[must_use]
    pub fn with_palette(palette: BackgroundPalette) -> Self {
        let mut store = Self::new();
        store.background = palette.day;
        store.palette = palette;
        store
    }

    /// Applies one command. Unknown ids are diagnosed and ignored; they
    /// never bump the version.
    ///
    /// Returns the id of the object the command affected, when any.
    pub fn apply(&mut self, command: SceneCommand) -> Option<String> {
        match command {
            SceneCommand::AddObject { primitive } => {
                let object = SceneObject::new(primitive);
                let id = object.id.clone();
                self.index.insert(id.clone(), self.objects.len());
                self.objects.push(object);
                self.bump();
                Some(id)
            }
            SceneCommand::RemoveObject { id } => {
                let Some(slot) = self.index.remove(&id) else {
                    warn!("remove: unknown object id {id}");
                    return None;
                };
                self.objects.remove(slot);
                self.reindex();
                if self.selected.as_deref() == Some(id.as_str()) {
                    self.selected = None;
                }
                self.bump();
                Some(id)
            }
            SceneCommand::RenameObject { id, name } => self.mutate(&id, |object| {
                object.name = name;
            }),
            SceneCommand::SetVisibility { id, visible } => self.mutate(&id, |object| {
                object.visible = visible;
            }),
            SceneCommand::DuplicateObject { id } => {
                let Some(&slot) = self.index.get(&id) else {
                    warn!("duplicate: unknown object id {id}");
                    return None;
                };
                let copy = self.objects[slot].duplicated();
                let copy_id = copy.id.clone();
                self.index.insert(copy_id.clone(), self.objects.len());
                self.objects.push(copy);
                self.bump();
                Some(copy_id)
            }
            SceneCommand::SetSelection { id } => {
                if let Some(id) = &id
                    && !self.index.contains_key(id)
                {
                    warn!("select: unknown object id {id}");
                    return None;
                }
                if self.selected != id {
                    self.selected = id.clone();
                    self.bump();
                }
                id
            }
            SceneCommand::UpdateTransform { id, transform } => {
                let Some(&slot) = self.index.get(&id) else {
                    warn!("update: unknown object id {id}");
                    return None;
                };
                let object = &mut self.objects[slot];
                object.transform = sanitize_transform(object.primitive, transform);
                self.bump();
                Some(id)
            }
            SceneCommand::UpdateMaterial { id, material } => self.mutate(&id, |object| {
                object.material = material.clamped();
            }),
            SceneCommand::SetBackground { color } => {
                let color = color & 0x00FF_FFFF;
                if self.background != color {
                    self.background = color;
                    self.bump();
                }
                None
            }
            SceneCommand::SetBackgroundPreset { preset } => {
                let color = self.palette.color_for(preset);
                self.apply(SceneCommand::SetBackground { color })
            }
        }
    }

    /// Requests a redraw without changing scene content (the
    /// `renderInvalidated` signal).
    pub fn invalidate_render(&mut self) {
        self.render_epoch = self.render_epoch.wrapping_add(1);
    }

    /// The read-only copy the renderer and picker consume this frame.
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            objects: self.objects.clone(),
            background: self.background,
            selected: self.selected.clone(),
            version: self.version,
            render_epoch: self.render_epoch,
        }
    }

    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.index.get(id).map(|&slot| &self.objects[slot])
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn background(&self) -> u32 {
        self.background
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn to_json(&self) -> Result<String> {
        let doc = SceneDocument {
            objects: self.objects.clone(),
            background: self.background,
            selected: self.selected.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SceneDocument = serde_json::from_str(json)?;
        let mut store = Self::new();
        store.objects = doc.objects;
        store.background = doc.background & 0x00FF_FFFF;
        store.reindex();
        if let Some(selected) = doc.selected
            && store.index.contains_key(&selected)
        {
            store.selected = Some(selected);
        }
        store.bump();
        Ok(store)
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn mutate(&mut self, id: &str, f: impl FnOnce(&mut SceneObject)) -> Option<String> {
        let Some(&slot) = self.index.get(id) else {
            warn!("update: unknown object id {id}");
            return None;
        };
        f(&mut self.objects[slot]);
        self.bump();
        Some(id.to_string())
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (slot, object) in self.objects.iter().enumerate() {
            self.index.insert(object.id.clone(), slot);
        }
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// Clamps a transform to the ranges the data model promises:
/// strictly positive scale, uniform scale for spheres, and
/// `major > minor > 0` for the torus scale encoding `(R, r, r)`.
#[must_use]
pub fn sanitize_transform(primitive: PrimitiveKind, mut transform: Transform) -> Transform {
    transform.scale = transform.scale.max(Vec3::splat(MIN_SCALE));
    match primitive {
        PrimitiveKind::Sphere => {
            transform.scale = Vec3::splat(transform.scale.max_element());
        }
        PrimitiveKind::Torus => {
            let major = transform.scale.x;
            let minor = transform.scale.y.min(major * 0.99);
            transform.scale = Vec3::new(major, minor, minor);
        }
        _ => {}
    }
    transform
}
