//! Per-frame egui pass: HUD, node labels and the section overlay

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use uplink_core::OverlayView;
use uplink_scene::camera::MainCamera;
use uplink_scene::models::NodeEntity;
use uplink_scene::ui::{render_hud, render_node_labels, render_overlay, NodeLabel};
use uplink_scene::{CloseOverlay, ContactFormState, SceneInteraction, UiLayout};

use crate::network::{DaemonConfig, HttpSubmitter, PendingContactResults};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_ui_layout)
            .add_systems(EguiPrimaryContextPass, ui_system);
    }
}

/// Track the primary window size for the responsive overlay
fn update_ui_layout(windows: Query<&Window>, mut ui_layout: ResMut<UiLayout>) {
    if let Ok(window) = windows.single() {
        let width = window.width();
        let height = window.height();

        if (ui_layout.screen_width - width).abs() > 1.0
            || (ui_layout.screen_height - height).abs() > 1.0
        {
            ui_layout.update_from_window(width, height);
        }
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    interaction: Res<SceneInteraction>,
    mut form: ResMut<ContactFormState>,
    ui_layout: Res<UiLayout>,
    time: Res<Time>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    nodes: Query<(&NodeEntity, &GlobalTransform, &Name)>,
    daemon_config: Res<DaemonConfig>,
    pending: Res<PendingContactResults>,
    mut close: MessageWriter<CloseOverlay>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    if ui_layout.is_mobile {
        let mut style = (*ctx.style()).clone();
        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
    }

    render_hud(ctx, time.elapsed_secs_f64(), &ui_layout);

    if let Ok((camera, camera_transform)) = camera.single() {
        let labels: Vec<NodeLabel> = nodes
            .iter()
            .filter_map(|(node, transform, name)| {
                // Anchor just above the top of the node
                let anchor = transform.translation() + Vec3::Y * 1.6;
                let screen = camera.world_to_viewport(camera_transform, anchor).ok()?;
                Some(NodeLabel {
                    section: node.section,
                    text: name.as_str().to_string(),
                    screen: egui::pos2(screen.x, screen.y),
                    color: node.color,
                })
            })
            .collect();
        render_node_labels(ctx, &labels, interaction.0.hovered(), &ui_layout);
    }

    let view = OverlayView::of(&interaction.0);
    let action = render_overlay(ctx, &view, &mut form.0, &ui_layout);

    if action.transmit {
        let mut submitter = HttpSubmitter::new(&daemon_config, &pending);
        if let Err(e) = form.0.transmit(&mut submitter) {
            tracing::debug!("Contact form not sent: {}", e);
        }
    }

    if action.close {
        close.write(CloseOverlay);
    }
}
