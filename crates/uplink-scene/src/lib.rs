//! Uplink Scene - Shared 3D city scene and terminal overlay
//!
//! This crate wires the interaction state machine from `uplink-core` into
//! Bevy: node entities and their picking observers, camera transitions,
//! avatar movement, cursor affordance, and the egui overlay panes.

pub mod camera;
pub mod interaction;
pub mod models;
pub mod scene;
pub mod types;
pub mod ui;

use bevy::prelude::*;
use uplink_core::SceneTheme;

/// Plugin that sets up the shared 3D scene for a theme
pub struct UplinkScenePlugin {
    pub theme: SceneTheme,
}

impl Default for UplinkScenePlugin {
    fn default() -> Self {
        Self {
            theme: SceneTheme::default(),
        }
    }
}

impl Plugin for UplinkScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(types::SceneInteraction::new(self.theme.clone()))
            .init_resource::<types::UiLayout>()
            .init_resource::<types::ContactFormState>()
            .add_message::<types::SceneEffectMessage>()
            .add_message::<types::CloseOverlay>()
            .add_systems(Update, types::expire_contact_notice)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(models::ModelsPlugin)
            .add_plugins(interaction::InteractionPlugin);
    }
}

// Re-export commonly used types
pub use types::*;
pub use camera::CameraRig;
