//! Overlay controller - derived view of the active section

use crate::content::{content_for, Hud, Pane};
use crate::interaction::{InteractionState, SceneEffect};
use crate::section::Section;

/// What the overlay should display right now
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub visible: bool,
    pub section: Option<Section>,
    pub pane: Option<Pane>,
    pub title: Option<String>,
}

impl OverlayView {
    pub fn of(state: &InteractionState) -> Self {
        let section = state.active_section();
        Self {
            visible: section.is_some(),
            section,
            pane: content_for(section),
            title: section.map(Hud::terminal_title),
        }
    }
}

/// Close control for the overlay. Holds no state of its own.
pub struct Overlay;

impl Overlay {
    pub fn close(state: &mut InteractionState) -> Vec<SceneEffect> {
        state.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::SceneTheme;

    #[test]
    fn test_hidden_when_nothing_selected() {
        let state = InteractionState::new(SceneTheme::default());
        let view = OverlayView::of(&state);
        assert!(!view.visible);
        assert_eq!(view.pane, None);
        assert_eq!(view.title, None);
    }

    #[test]
    fn test_skills_round_trip_through_overlay() {
        let theme = SceneTheme::cyber_city();
        let skills_position = theme.registry.get(Section::Skills).unwrap().position;
        let mut state = InteractionState::new(theme);
        assert_eq!(state.active_section(), None);

        state.select(Section::Skills);
        let view = OverlayView::of(&state);
        assert!(view.visible);
        assert_eq!(view.section, Some(Section::Skills));
        assert!(matches!(view.pane, Some(Pane::Skills(_))));
        assert_eq!(view.title.as_deref(), Some("ROOT@MAINFRAME:~/SKILLS"));
        assert_eq!(state.camera_target().look_at, skills_position);

        let effects = Overlay::close(&mut state);
        assert_eq!(effects, vec![SceneEffect::OverlayChanged(None)]);
        let view = OverlayView::of(&state);
        assert!(!view.visible);
        assert_eq!(state.active_section(), None);
        assert_eq!(state.camera_target().look_at, skills_position);
    }
}
