//! Scene themes - presentation variants of the same menu expressed as data
//!
//! A theme supplies the node layout, the camera offset used when framing a
//! selected node, the home framing shown before anything is selected, and an
//! optional avatar that walks to the selected node. Themes are selected by
//! name with [`SceneTheme::builtin`].

use crate::interaction::CameraTarget;
use crate::registry::{Node, NodeRegistry};
use crate::section::Section;
use crate::Vec3;

/// Avatar settings for themes that have a walking character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarConfig {
    /// Offset from the selected node where the avatar stops
    pub lateral_offset: Vec3,
    /// Where the avatar stands before anything is selected
    pub home: Vec3,
}

/// A complete presentation variant
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTheme {
    pub name: String,
    pub registry: NodeRegistry,
    /// Eye offset from the selected node's position
    pub camera_offset: Vec3,
    /// Initial camera framing
    pub home_camera: CameraTarget,
    pub avatar: Option<AvatarConfig>,
    /// Accent color as RGB (0.0-1.0)
    pub accent: [f32; 3],
}

fn default_home_eye() -> Vec3 {
    [0.0, 12.0, 22.0]
}

fn default_accent() -> [f32; 3] {
    [0.0, 1.0, 1.0]
}

impl SceneTheme {
    /// Night city with the hub tower in the middle and a walking avatar
    pub fn cyber_city() -> Self {
        let nodes = vec![
            Node::new(Section::Profile, [0.0, 0.0, 0.0], 1.4),
            Node::new(Section::Experience, [-6.0, 1.5, -4.0], 1.0),
            Node::new(Section::Skills, [6.0, 1.5, -4.0], 1.0),
            Node::new(Section::Achievements, [-5.0, 2.0, 5.0], 1.0),
            Node::new(Section::Contact, [5.0, 2.0, 5.0], 1.0),
        ];

        Self {
            name: "cyber_city".to_string(),
            registry: NodeRegistry::new(nodes).expect("built-in layout covers every section"),
            camera_offset: [0.0, 4.0, 10.0],
            home_camera: CameraTarget {
                eye: default_home_eye(),
                look_at: [0.0, 0.0, 0.0],
            },
            avatar: Some(AvatarConfig {
                lateral_offset: [1.5, 0.0, 1.5],
                home: [0.0, 0.0, 4.0],
            }),
            accent: default_accent(),
        }
    }

    /// Flat row of menu terminals, no avatar
    pub fn terminal_grid() -> Self {
        let nodes = Section::ALL
            .into_iter()
            .enumerate()
            .map(|(i, section)| Node::new(section, [(i as f32 - 2.0) * 4.0, 0.0, 0.0], 1.2))
            .collect();

        Self {
            name: "terminal_grid".to_string(),
            registry: NodeRegistry::new(nodes).expect("built-in layout covers every section"),
            camera_offset: [0.0, 0.0, 8.0],
            home_camera: CameraTarget {
                eye: [0.0, 2.0, 18.0],
                look_at: [0.0, 0.0, 0.0],
            },
            avatar: None,
            accent: default_accent(),
        }
    }

    /// Look up a built-in theme by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "cyber_city" => Some(Self::cyber_city()),
            "terminal_grid" => Some(Self::terminal_grid()),
            _ => None,
        }
    }
}

impl Default for SceneTheme {
    fn default() -> Self {
        Self::cyber_city()
    }
}
