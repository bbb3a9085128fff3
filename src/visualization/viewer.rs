use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::math::primitives::{Cuboid, Sphere as SphereShape};

use crate::configuration::config::CameraConfig;
use crate::simulation::engine::{FramePacer, Pacing};
use crate::simulation::forms::{Color as FormColor, CubeFace, Form, Surface};
use crate::simulation::geometry::Point;
use crate::simulation::scene::Scene;

/// Component tagging each spawned mesh with its index into Scene.forms
#[derive(Component)]
struct FormIndex(pub usize);

/// Marker for the single viewing camera
#[derive(Component)]
struct ViewCamera;

/// Keyboard-driven camera state, owned by the driver and never by the core
#[derive(Resource, Debug, Clone)]
struct CameraRig {
    position: Vec3,
    rho: f32, // degrees around +Y
    home: Vec3,
    home_rho: f32,
}

impl CameraRig {
    fn from_config(cfg: &CameraConfig) -> Self {
        let position = Vec3::new(cfg.position[0] as f32, cfg.position[1] as f32, cfg.position[2] as f32);
        Self {
            position,
            rho: cfg.rho as f32,
            home: position,
            home_rho: cfg.rho as f32,
        }
    }

    /// Camera looks at the origin from `position`, after the world is turned by rho
    fn transform(&self) -> Transform {
        let turned = Quat::from_rotation_y(-self.rho.to_radians()) * self.position;
        Transform::from_translation(turned).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

#[derive(Resource)]
struct Pacer(FramePacer);

/// Camera speed along the view direction, per key press
const CAMERA_STEP: f32 = 0.1;

/// Point the U/I/J presets line the camera up on
const PRESET_ANCHOR: Vec3 = Vec3::new(0.0, -2.0, 0.0);

/// Open a window and animate `scene` until it is closed
pub fn run_viewer(scene: Scene, camera: CameraConfig) {
    let pacer = Pacer(scene.engine.pacer());
    App::new()
        .insert_resource(CameraRig::from_config(&camera))
        .insert_resource(pacer)
        .insert_resource(scene)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (camera_keys, physics_step, sync_transforms, sync_camera).chain())
        .run();
}

/// Startup system: camera, light, axes and one mesh per form
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<Scene>,
    rig: Res<CameraRig>,
) {
    info!(
        "viewer: {} forms ({} spheres), water level {}",
        scene.forms.len(),
        scene.spheres().count(),
        scene.parameters().water_level
    );

    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
                ..Default::default()
            },
            transform: rig.transform(),
            ..Default::default()
        },
        ViewCamera,
    ));

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 4000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(2.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    for (i, form) in scene.forms.iter().enumerate() {
        let mesh = match form {
            Form::Sphere(s) => meshes.add(SphereShape::new(s.radius() as f32).mesh()),
            Form::CubeFace(f) => meshes.add(face_mesh(f)),
            Form::Surface(s) => meshes.add(surface_mesh(s)),
        };
        let placement = form.render_hook();

        commands.spawn((
            PbrBundle {
                mesh,
                material: materials.add(material_for(form.color())),
                transform: Transform::from_translation(to_vec3(&placement.position)),
                ..Default::default()
            },
            FormIndex(i),
        ));
    }
}

/// Per-frame physics, paced by the scene's engine settings
fn physics_step(
    mut scene: ResMut<Scene>,
    mut pacer: ResMut<Pacer>,
    time: Res<Time>,
    mut exit: EventWriter<AppExit>,
) {
    let dt = match scene.engine.pacing {
        Pacing::Fixed => Some(scene.parameters().h0),
        Pacing::Realtime => pacer.0.advance(time.delta_seconds_f64()),
    };
    let Some(dt) = dt else {
        return;
    };

    if let Err(e) = scene.step(dt) {
        error!("simulation stopped: {e}");
        exit.send(AppExit::error());
    }
}

/// Copy render placements onto the spawned meshes
fn sync_transforms(scene: Res<Scene>, mut query: Query<(&FormIndex, &mut Transform)>) {
    for (FormIndex(i), mut transform) in &mut query {
        if let Some(form) = scene.forms.get(*i) {
            let placement = form.render_hook();
            transform.translation = to_vec3(&placement.position);
        }
    }
}

fn camera_keys(keys: Res<ButtonInput<KeyCode>>, mut rig: ResMut<CameraRig>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
        return;
    }

    // Arrows slide along -Z before the rho turn is applied
    let forward = Vec3::new(0.0, 0.0, -1.0);

    if keys.just_pressed(KeyCode::ArrowUp) {
        rig.position += forward * CAMERA_STEP;
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        rig.position -= forward * CAMERA_STEP;
    }
    if keys.just_pressed(KeyCode::KeyO) {
        rig.rho += 5.0;
    }
    if keys.just_pressed(KeyCode::KeyP) {
        rig.rho -= 5.0;
    }
    if keys.just_pressed(KeyCode::KeyZ) {
        rig.position.y += 0.5;
    }
    if keys.just_pressed(KeyCode::KeyS) {
        rig.position.y -= 0.5;
    }
    // presets: above and behind the anchor, rotation off
    if keys.just_pressed(KeyCode::KeyU) {
        rig.position.x = PRESET_ANCHOR.x;
    }
    if keys.just_pressed(KeyCode::KeyI) {
        rig.position.y = PRESET_ANCHOR.y + 5.0;
    }
    if keys.just_pressed(KeyCode::KeyJ) {
        rig.position.z = PRESET_ANCHOR.z - 10.0;
    }
    if keys.just_pressed(KeyCode::KeyM) {
        rig.rho = 0.0;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        let (home, home_rho) = (rig.home, rig.home_rho);
        rig.position = home;
        rig.rho = home_rho;
    }
    if rig.is_changed() {
        debug!("camera at {:?}, rho {}", rig.position, rig.rho);
    }
}

fn sync_camera(rig: Res<CameraRig>, mut query: Query<&mut Transform, With<ViewCamera>>) {
    if !rig.is_changed() {
        return;
    }
    for mut transform in &mut query {
        *transform = rig.transform();
    }
}

// ========================================================================================
// Meshes and materials
// ========================================================================================

fn to_vec3(p: &Point) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

fn material_for(color: FormColor) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba(color.r, color.g, color.b, color.a),
        alpha_mode: if color.is_transparent() { AlphaMode::Blend } else { AlphaMode::Opaque },
        double_sided: true,
        cull_mode: None,
        ..Default::default()
    }
}

/// Two triangles over the face's local quad
fn face_mesh(face: &CubeFace) -> Mesh {
    let corners = face.local_corners().map(|p| to_vec3(&p));
    let (d1, d2) = face.directions();
    let normal = d1.cross(&d2);
    let n = [normal.x as f32, normal.y as f32, normal.z as f32];

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, corners.iter().map(|c| c.to_array()).collect::<Vec<_>>())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![n; 4])
        .with_inserted_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3]))
}

/// Control net of the surface, triangulated cell by cell
fn surface_mesh(surface: &Surface) -> Mesh {
    let (nx, nz) = surface.grid();
    let positions: Vec<[f32; 3]> = surface
        .control_points()
        .iter()
        .map(|p| to_vec3(p).to_array())
        .collect();

    let mut indices = Vec::new();
    for row in 0..nz.saturating_sub(1) {
        for col in 0..nx.saturating_sub(1) {
            let a = (row * nx + col) as u32;
            let b = a + 1;
            let c = a + nx as u32;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(indices));
    mesh.duplicate_vertices();
    mesh.compute_flat_normals();
    mesh
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 1.0;
    let axis_thickness = 0.01;

    // (size, offset, color): each axis runs from the origin along +X, +Y, +Z
    let axes = [
        (Vec3::new(axis_len, axis_thickness, axis_thickness), Vec3::X, Color::srgb(1.0, 0.0, 0.0)),
        (Vec3::new(axis_thickness, axis_len, axis_thickness), Vec3::Y, Color::srgb(0.0, 1.0, 0.0)),
        (Vec3::new(axis_thickness, axis_thickness, axis_len), Vec3::Z, Color::srgb(0.0, 0.0, 1.0)),
    ];

    for (size, dir, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::from_size(size).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            // Cuboid is centered on its transform, shift it so it starts at the origin
            transform: Transform::from_translation(dir * axis_len * 0.5),
            ..Default::default()
        });
    }
}
