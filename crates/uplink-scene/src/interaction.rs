//! Pointer and keyboard input routed into the interaction state machine

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_picking::events::{Click, Out, Over, Pointer};
use uplink_core::{Overlay, SceneEffect, Section};

use crate::models::NodeEntity;
use crate::types::{CloseOverlay, SceneEffectMessage, SceneInteraction};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (close_on_escape, handle_close_requests, update_cursor).chain());
    }
}

fn dispatch(writer: &mut MessageWriter<SceneEffectMessage>, effects: Vec<SceneEffect>) {
    for effect in effects {
        writer.write(SceneEffectMessage(effect));
    }
}

pub(crate) fn on_node_over(
    trigger: On<Pointer<Over>>,
    nodes: Query<&NodeEntity>,
    mut interaction: ResMut<SceneInteraction>,
    mut writer: MessageWriter<SceneEffectMessage>,
) {
    let Ok(node) = nodes.get(trigger.event().event_target()) else {
        return;
    };
    let effects = interaction.0.hover(node.section);
    dispatch(&mut writer, effects);
}

pub(crate) fn on_node_out(
    trigger: On<Pointer<Out>>,
    nodes: Query<&NodeEntity>,
    mut interaction: ResMut<SceneInteraction>,
    mut writer: MessageWriter<SceneEffectMessage>,
) {
    let Ok(node) = nodes.get(trigger.event().event_target()) else {
        return;
    };
    let effects = interaction.0.unhover(node.section);
    dispatch(&mut writer, effects);
}

pub(crate) fn on_node_click(
    trigger: On<Pointer<Click>>,
    nodes: Query<&NodeEntity>,
    mut interaction: ResMut<SceneInteraction>,
    mut writer: MessageWriter<SceneEffectMessage>,
) {
    let Ok(node) = nodes.get(trigger.event().event_target()) else {
        return;
    };
    tracing::info!(section = %node.section, "Node selected");
    let effects = interaction.0.select(node.section);
    dispatch(&mut writer, effects);
}

fn close_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut close: MessageWriter<CloseOverlay>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        close.write(CloseOverlay);
    }
}

fn handle_close_requests(
    mut requests: MessageReader<CloseOverlay>,
    mut interaction: ResMut<SceneInteraction>,
    mut writer: MessageWriter<SceneEffectMessage>,
) {
    for _ in requests.read() {
        let effects = Overlay::close(&mut interaction.0);
        dispatch(&mut writer, effects);
    }
}

/// Cursor shown while `hovered` is under the pointer
pub fn cursor_for(hovered: Option<Section>) -> SystemCursorIcon {
    if hovered.is_some() {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    }
}

fn update_cursor(
    mut commands: Commands,
    mut effects: MessageReader<SceneEffectMessage>,
    window: Query<Entity, With<PrimaryWindow>>,
) {
    let Some(hovered) = effects
        .read()
        .filter_map(|SceneEffectMessage(effect)| match effect {
            SceneEffect::HoverChanged(hovered) => Some(*hovered),
            _ => None,
        })
        .last()
    else {
        return;
    };

    if let Ok(window) = window.single() {
        commands
            .entity(window)
            .insert(CursorIcon::System(cursor_for(hovered)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_tracks_hover() {
        assert_eq!(cursor_for(Some(Section::Contact)), SystemCursorIcon::Pointer);
        assert_eq!(cursor_for(None), SystemCursorIcon::Default);
    }
}
