//! Node, connection and avatar entities

use bevy::prelude::*;
use bevy_picking::Pickable;
use uplink_core::{render_hint, SceneEffect, Section};

use crate::interaction::{on_node_click, on_node_out, on_node_over};
use crate::types::{to_color, to_vec3, SceneEffectMessage, SceneInteraction};

/// A selectable node in the scene
#[derive(Component)]
pub struct NodeEntity {
    pub section: Section,
    pub color: [f32; 3],
}

/// Hub-to-node connection line
#[derive(Component)]
pub struct ConnectionLine {
    pub to: Section,
}

/// The walking avatar
#[derive(Component)]
pub struct Avatar {
    pub target: Vec3,
    pub speed: f32,
}

/// Plugin for node and avatar entities
pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_nodes, spawn_connections, spawn_avatar))
            .add_systems(Update, (apply_render_hints, retarget_avatar, walk_avatar).chain());
    }
}

fn spawn_nodes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    interaction: Res<SceneInteraction>,
) {
    for node in interaction.0.theme().registry.iter() {
        let mesh = meshes.add(Cuboid::new(node.size, node.size * 2.0, node.size));
        let material = materials.add(StandardMaterial {
            base_color: to_color(node.color),
            metallic: 0.3,
            perceptual_roughness: 0.4,
            ..default()
        });

        commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(to_vec3(node.position)),
                NodeEntity {
                    section: node.id,
                    color: node.color,
                },
                Name::new(node.label.clone()),
            ))
            .observe(on_node_over)
            .observe(on_node_out)
            .observe(on_node_click);
    }

    tracing::info!(
        theme = %interaction.0.theme().name,
        nodes = interaction.0.theme().registry.len(),
        "Spawned scene nodes"
    );
}

fn spawn_connections(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    interaction: Res<SceneInteraction>,
) {
    let registry = &interaction.0.theme().registry;
    let hub = to_vec3(registry.hub().position);

    for edge in registry.edges() {
        let Some(node) = registry.get(edge.to) else {
            continue;
        };
        let end = to_vec3(node.position);
        let span = end - hub;
        let length = span.length();
        if length <= f32::EPSILON {
            continue;
        }

        let color = node.color;
        commands.spawn((
            Mesh3d(meshes.add(Cylinder::new(0.03, length))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: to_color(color).with_alpha(0.6),
                emissive: LinearRgba::new(color[0], color[1], color[2], 1.0),
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            // Cylinder is Y-aligned by default
            Transform::from_translation(hub + span / 2.0)
                .with_rotation(Quat::from_rotation_arc(Vec3::Y, span / length)),
            ConnectionLine { to: edge.to },
            Pickable::IGNORE,
        ));
    }
}

fn spawn_avatar(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    interaction: Res<SceneInteraction>,
) {
    let Some(home) = interaction.0.character_target() else {
        return;
    };
    let accent = interaction.0.theme().accent;

    commands.spawn((
        Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.9, 0.95),
            emissive: LinearRgba::new(accent[0] * 0.3, accent[1] * 0.3, accent[2] * 0.3, 1.0),
            ..default()
        })),
        Transform::from_translation(to_vec3(home)),
        Avatar {
            target: to_vec3(home),
            speed: 4.0,
        },
        Pickable::IGNORE,
    ));
}

/// Emissive color of a node glowing at `strength`
pub fn node_emissive(color: [f32; 3], strength: f32) -> LinearRgba {
    LinearRgba::new(color[0] * strength, color[1] * strength, color[2] * strength, 1.0)
}

/// Whether a material's emissive needs rewriting to reach `next`
pub fn emissive_differs(current: LinearRgba, next: LinearRgba) -> bool {
    const EPSILON: f32 = 1e-4;
    (current.red - next.red).abs() > EPSILON
        || (current.green - next.green).abs() > EPSILON
        || (current.blue - next.blue).abs() > EPSILON
        || (current.alpha - next.alpha).abs() > EPSILON
}

/// Scale and glow nodes from the pure render hint.
///
/// Materials are only written when the glow changes.
fn apply_render_hints(
    interaction: Res<SceneInteraction>,
    time: Res<Time>,
    mut nodes: Query<(&NodeEntity, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let elapsed = time.elapsed_secs();

    for (node, mut transform, material) in nodes.iter_mut() {
        let hint = render_hint(&interaction.0, node.section, elapsed);

        let scale = Vec3::splat(hint.scale);
        if transform.scale != scale {
            transform.scale = scale;
        }

        let emissive = node_emissive(node.color, hint.emissive);
        let stale = materials
            .get(&material.0)
            .is_some_and(|mat| emissive_differs(mat.emissive, emissive));
        if stale {
            if let Some(mat) = materials.get_mut(&material.0) {
                mat.emissive = emissive;
            }
        }
    }
}

fn retarget_avatar(mut effects: MessageReader<SceneEffectMessage>, mut avatars: Query<&mut Avatar>) {
    for SceneEffectMessage(effect) in effects.read() {
        if let SceneEffect::CharacterWalk(target) = effect {
            for mut avatar in avatars.iter_mut() {
                avatar.target = to_vec3(*target);
            }
        }
    }
}

/// Next avatar position moving at most `max_step` toward `target`
pub fn step_toward(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_step || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_step
    }
}

fn walk_avatar(time: Res<Time>, mut avatars: Query<(&Avatar, &mut Transform)>) {
    let dt = time.delta_secs();
    for (avatar, mut transform) in avatars.iter_mut() {
        if transform.translation == avatar.target {
            continue;
        }
        let next = step_toward(transform.translation, avatar.target, avatar.speed * dt);
        let heading = Vec3::new(next.x, transform.translation.y, next.z);
        if heading.distance_squared(transform.translation) > 1e-8 {
            transform.look_at(heading, Vec3::Y);
        }
        transform.translation = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward_clamps_to_target() {
        let target = Vec3::new(3.0, 0.0, 4.0);
        let next = step_toward(Vec3::ZERO, target, 1.0);
        assert!((next.length() - 1.0).abs() < 1e-5);
        assert_eq!(step_toward(Vec3::ZERO, target, 10.0), target);
        assert_eq!(step_toward(target, target, 1.0), target);
    }

    #[test]
    fn test_idle_glow_needs_no_rewrite() {
        let state = uplink_core::InteractionState::new(uplink_core::SceneTheme::cyber_city());
        let color = Section::Skills.default_color();
        let idle = render_hint(&state, Section::Skills, 0.0);

        let applied = node_emissive(color, idle.emissive);
        for elapsed in [0.5, 3.0, 120.0] {
            let hint = render_hint(&state, Section::Skills, elapsed);
            assert!(!emissive_differs(applied, node_emissive(color, hint.emissive)));
        }

        assert!(emissive_differs(applied, node_emissive(color, idle.emissive + 0.5)));
    }
}
