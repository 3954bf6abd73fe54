//! Shared egui components for the terminal overlay and HUD

use bevy_egui::egui;
use uplink_core::content::{AchievementsPane, ContactPane, Experience, ProfilePane, SkillCategory};
use uplink_core::{ContactForm, Field, Hud, OverlayView, Pane, Section, SubmitStatus};

use crate::types::UiLayout;

const NEON_CYAN: egui::Color32 = egui::Color32::from_rgb(0, 255, 255);
const NEON_MAGENTA: egui::Color32 = egui::Color32::from_rgb(255, 0, 255);
const NEON_GREEN: egui::Color32 = egui::Color32::from_rgb(57, 255, 20);
const DIM: egui::Color32 = egui::Color32::from_rgb(140, 150, 160);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(255, 70, 70);

/// What the user asked for while the overlay was drawn this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayAction {
    pub close: bool,
    pub transmit: bool,
}

/// Screen-space label for a scene node
#[derive(Debug, Clone)]
pub struct NodeLabel {
    pub section: Section,
    pub text: String,
    pub screen: egui::Pos2,
    pub color: [f32; 3],
}

fn color32(rgb: [f32; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(
        (rgb[0].clamp(0.0, 1.0) * 255.0) as u8,
        (rgb[1].clamp(0.0, 1.0) * 255.0) as u8,
        (rgb[2].clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Render the terminal overlay for the active section.
///
/// Nothing is drawn when the view is hidden.
pub fn render_overlay(
    ctx: &egui::Context,
    view: &OverlayView,
    form: &mut ContactForm,
    ui_layout: &UiLayout,
) -> OverlayAction {
    let mut action = OverlayAction::default();
    let (Some(pane), Some(title)) = (view.pane, view.title.as_deref()) else {
        return action;
    };
    if !view.visible {
        return action;
    }

    let ui_scale = ui_layout.ui_scale();
    let width = ui_layout.overlay_width();
    let height = ui_layout.overlay_height();

    egui::Window::new(title)
        .id(egui::Id::new("terminal_overlay"))
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .fixed_size(egui::vec2(width, height))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgba_unmultiplied(5, 8, 12, 235))
                .stroke(egui::Stroke::new(1.0, NEON_CYAN)),
        )
        .show(ctx, |ui| {
            // Title bar
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(title).monospace().size(14.0 * ui_scale).color(NEON_CYAN));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let close_button = if ui_layout.is_mobile {
                        egui::Button::new(egui::RichText::new("✕").size(18.0 * ui_scale))
                            .min_size(egui::vec2(40.0, 40.0))
                    } else {
                        egui::Button::new("✕")
                    };
                    if ui.add(close_button).clicked() {
                        action.close = true;
                    }
                });
            });
            ui.separator();

            ui.heading(egui::RichText::new(pane.heading()).size(20.0 * ui_scale).color(NEON_MAGENTA));
            ui.add_space(8.0);

            egui::ScrollArea::vertical()
                .max_height(height - 110.0)
                .auto_shrink([false, false])
                .show(ui, |ui| match pane {
                    Pane::Profile(profile) => render_profile(ui, profile, ui_layout),
                    Pane::Experience(entries) => render_experience(ui, entries, ui_layout),
                    Pane::Skills(categories) => render_skills(ui, categories, ui_layout),
                    Pane::Achievements(achievements) => render_achievements(ui, achievements, ui_layout),
                    Pane::Contact(contact) => {
                        render_contact_details(ui, contact, ui_layout);
                        ui.add_space(12.0);
                        action.transmit = render_contact_form(ui, form, ui_layout);
                    }
                });

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(Hud::FOOTER_LEFT).small().color(NEON_GREEN));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(Hud::FOOTER_RIGHT).small().color(DIM));
                });
            });
        });

    action
}

pub fn render_profile(ui: &mut egui::Ui, profile: &ProfilePane, ui_layout: &UiLayout) {
    let ui_scale = ui_layout.ui_scale();

    ui.label(egui::RichText::new(profile.name).size(22.0 * ui_scale).strong());
    ui.label(egui::RichText::new(profile.title).color(NEON_CYAN));
    ui.add_space(6.0);

    for line in profile.summary {
        ui.label(*line);
    }

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Education").strong().color(NEON_MAGENTA));
    for education in profile.education {
        ui.group(|ui| {
            ui.label(egui::RichText::new(education.degree).strong());
            ui.label(education.school);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(education.period).small().color(DIM));
                ui.label(egui::RichText::new(education.score).small().color(NEON_GREEN));
            });
        });
    }

    ui.add_space(8.0);
    ui.label(egui::RichText::new(profile.statement).italics().color(DIM));
}

pub fn render_experience(ui: &mut egui::Ui, entries: &[Experience], ui_layout: &UiLayout) {
    let ui_scale = ui_layout.ui_scale();

    for entry in entries {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(entry.role).size(16.0 * ui_scale).strong());
                ui.label(egui::RichText::new(format!("@ {}", entry.company)).color(NEON_CYAN));
            });
            ui.label(egui::RichText::new(entry.period).small().color(DIM));
            for detail in entry.details {
                ui.label(format!("> {}", detail));
            }
        });
        ui.add_space(6.0);
    }
}

pub fn render_skills(ui: &mut egui::Ui, categories: &[SkillCategory], _ui_layout: &UiLayout) {
    for category in categories {
        ui.label(egui::RichText::new(category.name).strong().color(NEON_MAGENTA));
        ui.horizontal_wrapped(|ui| {
            for skill in category.skills {
                ui.label(egui::RichText::new(format!("[{}]", skill)).monospace().color(NEON_CYAN));
            }
        });
        ui.add_space(6.0);
    }
}

pub fn render_achievements(ui: &mut egui::Ui, achievements: &AchievementsPane, _ui_layout: &UiLayout) {
    let sections: [(&str, &[&str]); 3] = [
        ("Accomplishments", achievements.accomplishments),
        ("Publications", achievements.publications),
        ("Certifications", achievements.certifications),
    ];

    for (heading, items) in sections {
        if items.is_empty() {
            continue;
        }
        ui.collapsing(egui::RichText::new(heading).strong().color(NEON_MAGENTA), |ui| {
            for item in items {
                ui.label(format!("★ {}", item));
            }
        });
    }
}

fn render_contact_details(ui: &mut egui::Ui, contact: &ContactPane, _ui_layout: &UiLayout) {
    ui.label(contact.blurb);
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Email:").color(DIM));
        ui.label(egui::RichText::new(contact.email).color(NEON_CYAN));
    });
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Location:").color(DIM));
        ui.label(contact.location);
    });
}

fn field_error(ui: &mut egui::Ui, form: &ContactForm, field: Field) {
    if let Some(error) = form.errors.get(field) {
        ui.colored_label(ERROR_RED, error);
    }
}

/// Render the contact form; returns true when the user asked to transmit
pub fn render_contact_form(ui: &mut egui::Ui, form: &mut ContactForm, ui_layout: &UiLayout) -> bool {
    let ui_scale = ui_layout.ui_scale();
    let width = ui.available_width().min(520.0);
    let enabled = form.can_submit();

    ui.label(egui::RichText::new("Name").color(DIM));
    let mut changed = ui
        .add_enabled(
            enabled,
            egui::TextEdit::singleline(&mut form.name)
                .hint_text("Agent name")
                .desired_width(width),
        )
        .changed();
    field_error(ui, form, Field::Name);

    ui.label(egui::RichText::new("Email").color(DIM));
    changed |= ui
        .add_enabled(
            enabled,
            egui::TextEdit::singleline(&mut form.email)
                .hint_text("agent@domain.net")
                .desired_width(width),
        )
        .changed();
    field_error(ui, form, Field::Email);

    ui.label(egui::RichText::new("Message").color(DIM));
    changed |= ui
        .add_enabled(
            enabled,
            egui::TextEdit::multiline(&mut form.message)
                .hint_text("Enter transmission...")
                .desired_rows(5)
                .desired_width(width),
        )
        .changed();
    field_error(ui, form, Field::Message);

    if changed {
        form.edited();
    }

    ui.add_space(8.0);
    let button = egui::Button::new(egui::RichText::new(form.submit_label()).size(15.0 * ui_scale))
        .min_size(egui::vec2(width, 36.0));
    let clicked = ui.add_enabled(enabled, button).clicked();

    match form.status() {
        SubmitStatus::Sent => {
            ui.colored_label(NEON_GREEN, "Transmission received. Uplink will respond shortly.");
        }
        SubmitStatus::Failed(reason) => {
            ui.colored_label(ERROR_RED, format!("Transmission failed: {}", reason));
        }
        SubmitStatus::Idle | SubmitStatus::Pending => {}
    }

    clicked
}

/// Header and footer status bars around the scene
pub fn render_hud(ctx: &egui::Context, elapsed_secs: f64, ui_layout: &UiLayout) {
    let ui_scale = ui_layout.ui_scale();
    let frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 160))
        .inner_margin(egui::Margin::symmetric(12, 6));

    egui::TopBottomPanel::top("hud_header").frame(frame).show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(Hud::CALLSIGN).monospace().size(16.0 * ui_scale).color(NEON_CYAN));
            if !ui_layout.is_mobile {
                ui.separator();
                ui.label(egui::RichText::new(Hud::MISSION_STATUS).monospace().small().color(NEON_GREEN));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(Hud::LOCATION).monospace().small().color(DIM));
            });
        });
    });

    egui::TopBottomPanel::bottom("hud_footer").frame(frame).show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(Hud::uptime(elapsed_secs)).monospace().small().color(NEON_GREEN));
            if !ui_layout.is_mobile {
                ui.separator();
                ui.label(egui::RichText::new(Hud::CONNECTION_TYPE).monospace().small().color(DIM));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(Hud::TERMINAL_KEY).monospace().small().color(NEON_MAGENTA));
            });
        });
    });
}

/// Floating labels anchored to the projected node positions
pub fn render_node_labels(ctx: &egui::Context, labels: &[NodeLabel], hovered: Option<Section>, ui_layout: &UiLayout) {
    let ui_scale = ui_layout.ui_scale();

    for label in labels {
        let highlighted = hovered == Some(label.section);
        let color = if highlighted { egui::Color32::WHITE } else { color32(label.color) };

        egui::Area::new(egui::Id::new(("node_label", label.section.as_str())))
            .fixed_pos(label.screen)
            .pivot(egui::Align2::CENTER_BOTTOM)
            .order(egui::Order::Background)
            .interactable(false)
            .show(ctx, |ui| {
                let mut text = egui::RichText::new(&label.text).monospace().size(13.0 * ui_scale).color(color);
                if highlighted {
                    text = text.strong();
                }
                ui.label(text);
            });
    }
}
