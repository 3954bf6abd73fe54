//! Uplink Core - Sections, node registry, interaction state and contact form
//!
//! This crate provides the foundational types for the Uplink portfolio:
//! - Section identifiers and the node registry that places them in the scene
//! - Scene themes (presentation variants expressed as data)
//! - The interaction state machine driving hover, selection and camera framing
//! - The overlay controller mapping the active section to a content pane
//! - Static resume content
//! - Contact form validation and single-in-flight submission tracking

pub mod contact;
pub mod content;
pub mod interaction;
pub mod overlay;
pub mod registry;
pub mod section;
pub mod theme;

pub use contact::{
    ContactForm, ContactMessage, ContactSubmitter, Field, FieldErrors, StoredMessage, SubmitError,
    SubmitOutcome, SubmitStatus,
};
pub use content::{content_for, Hud, Pane};
pub use interaction::{
    render_hint, CameraTarget, CameraTransition, InteractionState, NodeRenderState, RenderHint,
    SceneEffect,
};
pub use overlay::{Overlay, OverlayView};
pub use registry::{Edge, Node, NodeRegistry, RegistryError};
pub use section::{Section, SectionParseError};
pub use theme::{AvatarConfig, SceneTheme};

/// A point or offset in scene space
pub type Vec3 = [f32; 3];

/// Component-wise sum of a position and an offset
pub fn offset(position: Vec3, by: Vec3) -> Vec3 {
    [position[0] + by[0], position[1] + by[1], position[2] + by[2]]
}
