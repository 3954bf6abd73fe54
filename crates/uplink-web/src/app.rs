//! Bevy application setup

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::{DefaultPickingPlugins, prelude::MeshPickingPlugin};
use uplink_core::SceneTheme;
use uplink_scene::UplinkScenePlugin;

use crate::network::{browser_query_param, NetworkPlugin};
use crate::ui::UiPlugin;

/// Resolve the scene theme from `?theme=`, falling back to the city
fn theme_from_browser() -> SceneTheme {
    let Some(name) = browser_query_param("theme") else {
        return SceneTheme::default();
    };

    match SceneTheme::builtin(&name) {
        Some(theme) => {
            tracing::info!("Using theme from URL parameter: {}", name);
            theme
        }
        None => {
            tracing::warn!("Unknown theme '{}', using default", name);
            SceneTheme::default()
        }
    }
}

/// Run the Bevy application
pub fn run() {
    App::new()
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "DEEPAK.SEC - Uplink".to_string(),
                    canvas: Some("#uplink-canvas".to_string()),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            })
        )
        // These must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .add_plugins(UplinkScenePlugin {
            theme: theme_from_browser(),
        })
        .add_plugins(NetworkPlugin)
        .add_plugins(UiPlugin)
        .run();
}
