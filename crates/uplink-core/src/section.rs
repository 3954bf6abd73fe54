//! Section identifiers shared by scene nodes and overlay panes

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// One of the five resume sections, also the join key between a scene node
/// and its overlay pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Profile,
    Experience,
    Skills,
    Achievements,
    Contact,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown section: {0}")]
pub struct SectionParseError(pub String);

impl Section {
    /// All sections in menu order
    pub const ALL: [Section; 5] = [
        Section::Profile,
        Section::Experience,
        Section::Skills,
        Section::Achievements,
        Section::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Achievements => "achievements",
            Section::Contact => "contact",
        }
    }

    /// Default menu label, e.g. `01_PROFILE`
    pub fn default_label(&self) -> &'static str {
        match self {
            Section::Profile => "01_PROFILE",
            Section::Experience => "02_EXPERIENCE",
            Section::Skills => "03_SKILLS",
            Section::Achievements => "04_ACHIEVEMENTS",
            Section::Contact => "05_COMM_LINK",
        }
    }

    /// Default node color as RGB (0.0-1.0)
    pub fn default_color(&self) -> [f32; 3] {
        match self {
            Section::Profile => [0.0, 1.0, 1.0],
            Section::Experience => [0.741, 0.0, 1.0],
            Section::Skills => [0.0, 1.0, 0.0],
            Section::Achievements => [0.918, 0.702, 0.031],
            Section::Contact => [0.937, 0.267, 0.267],
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Section {
    type Err = SectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SectionParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for section in Section::ALL {
            assert_eq!(section.to_string().parse::<Section>(), Ok(section));
        }
        assert_eq!("SKILLS".parse::<Section>(), Ok(Section::Skills));
    }

    #[test]
    fn test_parse_unknown() {
        assert!("blog".parse::<Section>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Section::Achievements).unwrap();
        assert_eq!(json, "\"achievements\"");
    }
}
