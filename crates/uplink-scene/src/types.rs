//! Shared resources and messages for the scene and overlay

use bevy::prelude::*;
use uplink_core::{ContactForm, InteractionState, SceneEffect, SceneTheme, SubmitStatus};

/// The interaction state machine for the mounted scene
#[derive(Debug, Clone, Resource)]
pub struct SceneInteraction(pub InteractionState);

impl SceneInteraction {
    pub fn new(theme: SceneTheme) -> Self {
        Self(InteractionState::new(theme))
    }
}

/// Contact form instance shown in the contact pane
#[derive(Debug, Clone, Default, Resource)]
pub struct ContactFormState(pub ContactForm);

/// Let a transport failure notice fade after its display time
pub fn expire_contact_notice(time: Res<Time>, mut form: ResMut<ContactFormState>) {
    if matches!(form.0.status(), SubmitStatus::Failed(_)) {
        form.0.tick(time.delta_secs());
    }
}

/// A state machine effect, broadcast to the systems that render it
#[derive(Debug, Clone, Copy, Message)]
pub struct SceneEffectMessage(pub SceneEffect);

/// Overlay asked to close (close control or Escape)
#[derive(Debug, Clone, Copy, Default, Message)]
pub struct CloseOverlay;

/// Convert a core scene-space point into a Bevy vector
pub fn to_vec3(p: uplink_core::Vec3) -> Vec3 {
    Vec3::from_array(p)
}

/// Convert a core RGB triple into a Bevy color
pub fn to_color(rgb: [f32; 3]) -> Color {
    Color::srgb(rgb[0], rgb[1], rgb[2])
}

/// UI layout detection and responsive settings
#[derive(Debug, Clone, Resource)]
pub struct UiLayout {
    pub is_mobile: bool,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            is_mobile: false,
            screen_width: 1920.0,
            screen_height: 1080.0,
        }
    }
}

impl UiLayout {
    pub fn update_from_window(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        // Consider mobile if width < 800 or in portrait orientation
        self.is_mobile = width < 800.0 || (height > width * 1.2);
    }

    /// Overlay window width, at most 4/5 of the screen
    pub fn overlay_width(&self) -> f32 {
        if self.is_mobile {
            self.screen_width * 0.95
        } else {
            (self.screen_width * 0.8).min(900.0)
        }
    }

    pub fn overlay_height(&self) -> f32 {
        self.screen_height * 0.8
    }

    pub fn ui_scale(&self) -> f32 {
        if self.is_mobile { 1.2 } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_switches_to_mobile() {
        let mut layout = UiLayout::default();
        layout.update_from_window(1280.0, 720.0);
        assert!(!layout.is_mobile);
        assert_eq!(layout.overlay_width(), 900.0);

        layout.update_from_window(390.0, 844.0);
        assert!(layout.is_mobile);
        assert_eq!(layout.ui_scale(), 1.2);
    }

    #[test]
    fn test_failure_notice_fades_with_time() {
        use std::time::Duration;
        use uplink_core::{ContactSubmitter, ContactMessage, SubmitOutcome};

        struct Discard;
        impl ContactSubmitter for Discard {
            fn submit(&mut self, _message: ContactMessage) {}
        }

        let mut form = ContactForm::new();
        form.name = "Tank".to_string();
        form.email = "tank@zion.net".to_string();
        form.message = "Operator online".to_string();
        form.transmit(&mut Discard).unwrap();
        form.resolve(SubmitOutcome::Failed("HTTP 502".to_string()));

        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(ContactFormState(form))
            .add_systems(Update, expire_contact_notice);

        let step = Duration::from_secs_f32(ContactForm::FAILURE_NOTICE_SECS + 1.0);
        app.world_mut().resource_mut::<Time>().advance_by(step);
        app.update();

        assert_eq!(
            app.world().resource::<ContactFormState>().0.status(),
            &SubmitStatus::Idle
        );
    }
}
