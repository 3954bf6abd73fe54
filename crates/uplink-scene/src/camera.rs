//! Camera rig - eases the main camera toward the requested framing

use bevy::prelude::*;
use uplink_core::CameraTransition;

use crate::types::{to_vec3, SceneEffectMessage, SceneInteraction};
use uplink_core::SceneEffect;

/// Current and requested camera framing
#[derive(Debug, Clone, Resource)]
pub struct CameraRig {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub target_eye: Vec3,
    pub target_look_at: Vec3,
    pub smooth_factor: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 12.0, 22.0),
            look_at: Vec3::ZERO,
            target_eye: Vec3::new(0.0, 12.0, 22.0),
            target_look_at: Vec3::ZERO,
            smooth_factor: 0.05,
        }
    }
}

impl CameraRig {
    /// Apply a transition request; non-animated requests snap immediately
    pub fn request(&mut self, transition: &CameraTransition) {
        self.target_eye = to_vec3(transition.eye);
        self.target_look_at = to_vec3(transition.look_at);
        if !transition.animate {
            self.eye = self.target_eye;
            self.look_at = self.target_look_at;
        }
    }

    /// Move a frame-rate independent step toward the target
    pub fn step(&mut self, dt: f32) {
        let lerp_factor = 1.0 - (-self.smooth_factor * 60.0 * dt).exp();
        self.eye += (self.target_eye - self.eye) * lerp_factor;
        self.look_at += (self.target_look_at - self.look_at) * lerp_factor;
    }

    pub fn is_settled(&self) -> bool {
        self.eye.distance_squared(self.target_eye) < 1e-6
            && self.look_at.distance_squared(self.target_look_at) < 1e-6
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera transitions
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (apply_camera_requests, update_camera).chain());
    }
}

fn spawn_camera(mut commands: Commands, interaction: Res<SceneInteraction>, mut rig: ResMut<CameraRig>) {
    rig.request(&interaction.0.initial_camera());

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(rig.eye).looking_at(rig.look_at, Vec3::Y),
        MainCamera,
    ));
}

fn apply_camera_requests(mut rig: ResMut<CameraRig>, mut effects: MessageReader<SceneEffectMessage>) {
    for SceneEffectMessage(effect) in effects.read() {
        if let SceneEffect::CameraTransition(transition) = effect {
            tracing::debug!(eye = ?transition.eye, look_at = ?transition.look_at, "Camera transition requested");
            rig.request(transition);
        }
    }
}

fn update_camera(
    mut rig: ResMut<CameraRig>,
    time: Res<Time>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if rig.is_settled() {
        return;
    }
    rig.step(time.delta_secs());

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = rig.eye;
        transform.look_at(rig.look_at, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_request_settles_immediately() {
        let mut rig = CameraRig::default();
        rig.request(&CameraTransition {
            eye: [1.0, 2.0, 3.0],
            look_at: [0.0, 1.0, 0.0],
            animate: false,
        });
        assert_eq!(rig.eye, Vec3::new(1.0, 2.0, 3.0));
        assert!(rig.is_settled());
    }

    #[test]
    fn test_animated_request_converges() {
        let mut rig = CameraRig::default();
        rig.request(&CameraTransition {
            eye: [6.0, 5.5, 6.0],
            look_at: [6.0, 1.5, -4.0],
            animate: true,
        });
        assert!(!rig.is_settled());

        let start = rig.eye.distance(rig.target_eye);
        rig.step(1.0 / 60.0);
        assert!(rig.eye.distance(rig.target_eye) < start);

        for _ in 0..2000 {
            rig.step(1.0 / 60.0);
        }
        assert!(rig.is_settled());
    }
}
