//! Scene setup - lights, street grid and the city skyline

use bevy::prelude::*;

use crate::types::{to_color, SceneInteraction};

/// Marker component for the main directional light
#[derive(Component)]
pub struct MainDirectionalLight;

/// Marker component for street grid lines
#[derive(Component)]
pub struct GridLine;

/// Marker component for background buildings
#[derive(Component)]
pub struct Building;

const GRID_HALF_EXTENT: i32 = 15;
const GRID_SPACING: f32 = 2.0;
const SKYLINE_RADIUS: f32 = 24.0;
const SKYLINE_COUNT: usize = 36;

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, setup_environment);
    }
}

/// Deterministic building height for skyline slot `i`
pub fn building_height(i: usize) -> f32 {
    // Cheap hash so the skyline is stable across reloads
    let h = (i as u32).wrapping_mul(2_654_435_761) >> 24;
    4.0 + (h as f32 / 255.0) * 14.0
}

fn setup_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    interaction: Res<SceneInteraction>,
) {
    let accent = interaction.0.theme().accent;

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.6, 0.7, 1.0),
        brightness: 150.0,
        ..default()
    });

    // Moonlight
    commands.spawn((
        DirectionalLight {
            illuminance: 2000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainDirectionalLight,
    ));

    // Neon fill from the hub
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 40.0,
            shadows_enabled: false,
            color: to_color(accent),
            ..default()
        },
        Transform::from_xyz(0.0, 6.0, 0.0),
    ));

    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(80.0, 80.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.02, 0.02, 0.04),
            perceptual_roughness: 0.3,
            metallic: 0.6,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    // Street grid
    let extent = GRID_HALF_EXTENT as f32 * GRID_SPACING;
    let thickness = 0.04;
    let line_material = materials.add(StandardMaterial {
        base_color: to_color(accent).with_alpha(0.35),
        emissive: LinearRgba::new(accent[0] * 0.4, accent[1] * 0.4, accent[2] * 0.4, 1.0),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let line_x = meshes.add(Cuboid::new(extent * 2.0, thickness, thickness));
    let line_z = meshes.add(Cuboid::new(thickness, thickness, extent * 2.0));

    for i in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
        let d = i as f32 * GRID_SPACING;
        commands.spawn((
            Mesh3d(line_x.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::from_xyz(0.0, -0.48, d),
            GridLine,
        ));
        commands.spawn((
            Mesh3d(line_z.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::from_xyz(d, -0.48, 0.0),
            GridLine,
        ));
    }

    // Skyline ring
    let building_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.05, 0.05, 0.09),
        emissive: LinearRgba::new(0.02, 0.0, 0.05, 1.0),
        perceptual_roughness: 0.8,
        ..default()
    });
    for i in 0..SKYLINE_COUNT {
        let angle = i as f32 / SKYLINE_COUNT as f32 * std::f32::consts::TAU;
        let height = building_height(i);
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(2.5, height, 2.5))),
            MeshMaterial3d(building_material.clone()),
            Transform::from_xyz(
                angle.cos() * SKYLINE_RADIUS,
                height / 2.0 - 0.5,
                angle.sin() * SKYLINE_RADIUS,
            ),
            Building,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_heights_are_stable_and_bounded() {
        for i in 0..SKYLINE_COUNT {
            let h = building_height(i);
            assert_eq!(h, building_height(i));
            assert!((4.0..=18.0).contains(&h));
        }
    }
}
