//! Interactive editor demo: a small starter scene with a ground slab,
//! a few primitives and an area light.
//!
//! Run with `cargo run --example editor`.

use glam::Vec3;
use lumen::app::App;
use lumen::{Material, PrimitiveKind, SceneCommand, SceneStore, Transform};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut scene = SceneStore::new();

    // Ground slab.
    add(
        &mut scene,
        PrimitiveKind::Cuboid,
        Transform {
            position: Vec3::new(0.0, -1.2, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::new(12.0, 0.2, 12.0),
        },
        Material::plastic(Vec3::splat(0.65)),
    );

    add(
        &mut scene,
        PrimitiveKind::Sphere,
        Transform::from_position(Vec3::new(-2.2, 0.0, 0.0)),
        Material::plastic(Vec3::new(0.8, 0.1, 0.1)),
    );
    add(
        &mut scene,
        PrimitiveKind::Sphere,
        Transform::from_position(Vec3::new(0.0, 0.0, 0.0)),
        Material::glass(Vec3::new(0.95, 0.95, 1.0), 1.5),
    );
    add(
        &mut scene,
        PrimitiveKind::Torus,
        Transform::from_position(Vec3::new(2.6, -0.6, 0.0)),
        Material::metal(Vec3::new(0.85, 0.7, 0.3)),
    );
    add(
        &mut scene,
        PrimitiveKind::Cuboid,
        Transform {
            position: Vec3::new(0.0, 4.5, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::new(2.5, 0.1, 2.5),
        },
        Material::light(Vec3::ONE, 8.0),
    );

    App::new().with_title("Lumen Editor").with_scene(scene).run()?;
    Ok(())
}

fn add(scene: &mut SceneStore, primitive: PrimitiveKind, transform: Transform, material: Material) {
    if let Some(id) = scene.apply(SceneCommand::AddObject { primitive }) {
        scene.apply(SceneCommand::UpdateTransform {
            id: id.clone(),
            transform,
        });
        scene.apply(SceneCommand::UpdateMaterial { id, material });
    }
}
