//! Interaction state machine - hover, selection and derived camera framing
//!
//! All transitions are synchronous and return the [`SceneEffect`]s they
//! produced. The renderer applies those effects (camera animation, cursor
//! affordance, overlay visibility); this module never touches host state.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::section::Section;
use crate::theme::SceneTheme;
use crate::{offset, Vec3};

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    pub eye: Vec3,
    pub look_at: Vec3,
}

/// Request for the renderer to move its camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    pub eye: Vec3,
    pub look_at: Vec3,
    /// Interpolate over time instead of snapping
    pub animate: bool,
}

/// Observable outcome of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEffect {
    /// Hovered node changed (drives cursor affordance)
    HoverChanged(Option<Section>),
    CameraTransition(CameraTransition),
    /// Avatar should walk to this point
    CharacterWalk(Vec3),
    /// Overlay should show this section, or hide
    OverlayChanged(Option<Section>),
}

/// Per-node presentation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeRenderState {
    pub is_hovered: bool,
    pub is_active: bool,
}

/// Mutable interaction state for one mounted scene
#[derive(Debug, Clone)]
pub struct InteractionState {
    theme: SceneTheme,
    hovered: Option<Section>,
    active: Option<Section>,
    camera: CameraTarget,
    character: Option<Vec3>,
}

impl InteractionState {
    pub fn new(theme: SceneTheme) -> Self {
        let camera = theme.home_camera;
        let character = theme.avatar.map(|a| a.home);
        Self {
            theme,
            hovered: None,
            active: None,
            camera,
            character,
        }
    }

    pub fn theme(&self) -> &SceneTheme {
        &self.theme
    }

    pub fn hovered(&self) -> Option<Section> {
        self.hovered
    }

    pub fn active_section(&self) -> Option<Section> {
        self.active
    }

    pub fn camera_target(&self) -> CameraTarget {
        self.camera
    }

    /// Avatar destination, `None` for themes without an avatar
    pub fn character_target(&self) -> Option<Vec3> {
        self.character
    }

    /// Initial camera request issued when the scene mounts
    pub fn initial_camera(&self) -> CameraTransition {
        CameraTransition {
            eye: self.camera.eye,
            look_at: self.camera.look_at,
            animate: false,
        }
    }

    pub fn node_state(&self, id: Section) -> NodeRenderState {
        NodeRenderState {
            is_hovered: self.hovered == Some(id),
            is_active: self.active == Some(id),
        }
    }

    /// Pointer entered a node
    pub fn hover(&mut self, id: Section) -> Vec<SceneEffect> {
        if self.hovered == Some(id) {
            return Vec::new();
        }
        self.hovered = Some(id);
        vec![SceneEffect::HoverChanged(Some(id))]
    }

    /// Pointer left a node. Ignored unless `id` is the hovered node.
    pub fn unhover(&mut self, id: Section) -> Vec<SceneEffect> {
        if self.hovered != Some(id) {
            debug!(node = %id, hovered = ?self.hovered, "Ignoring stale unhover");
            return Vec::new();
        }
        self.hovered = None;
        vec![SceneEffect::HoverChanged(None)]
    }

    /// Node clicked: open its section and frame it
    pub fn select(&mut self, id: Section) -> Vec<SceneEffect> {
        let Some(node) = self.theme.registry.get(id) else {
            debug_assert!(false, "section {id} has no node in theme {}", self.theme.name);
            warn!(node = %id, theme = %self.theme.name, "Select on unknown node ignored");
            return Vec::new();
        };
        let position = node.position;

        self.active = Some(id);
        self.camera = CameraTarget {
            eye: offset(position, self.theme.camera_offset),
            look_at: position,
        };

        let mut effects = vec![
            SceneEffect::OverlayChanged(Some(id)),
            SceneEffect::CameraTransition(CameraTransition {
                eye: self.camera.eye,
                look_at: self.camera.look_at,
                animate: true,
            }),
        ];

        if let Some(avatar) = self.theme.avatar {
            let target = offset(position, avatar.lateral_offset);
            self.character = Some(target);
            effects.push(SceneEffect::CharacterWalk(target));
        }

        debug!(node = %id, eye = ?self.camera.eye, "Section selected");
        effects
    }

    /// Hide the overlay. Camera framing stays where it is.
    pub fn close(&mut self) -> Vec<SceneEffect> {
        if self.active.take().is_none() {
            return Vec::new();
        }
        vec![SceneEffect::OverlayChanged(None)]
    }
}

/// Presentation emphasis for a node at a given moment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderHint {
    /// Uniform scale multiplier
    pub scale: f32,
    /// Emissive strength multiplier (0.0-1.0)
    pub emissive: f32,
}

const IDLE_EMISSIVE: f32 = 0.25;
const HOVER_SCALE: f32 = 1.2;
const PULSE_RATE: f32 = 3.0;
const PULSE_SCALE: f32 = 0.08;

/// Emphasis for node `id`, a pure function of state and elapsed time
pub fn render_hint(state: &InteractionState, id: Section, elapsed_secs: f32) -> RenderHint {
    let flags = state.node_state(id);
    // 0.0..=1.0
    let pulse = (elapsed_secs * PULSE_RATE).sin() * 0.5 + 0.5;

    let mut scale = if flags.is_hovered { HOVER_SCALE } else { 1.0 };
    let mut emissive = if flags.is_hovered { 1.0 } else { IDLE_EMISSIVE };

    if flags.is_active {
        scale += PULSE_SCALE * pulse;
        emissive = emissive.max(0.6 + 0.4 * pulse);
    }

    RenderHint { scale, emissive }
}
