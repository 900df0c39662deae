//! View projection
//!
//! Turns a `NavigationState` into a flat description of what the page should
//! show. Renderers consume `DeckView` and never look at the state directly.

use crate::nav::{DeckLayout, NavigationState};

/// Scale of sections that are not centred
pub const INACTIVE_SECTION_SCALE: f32 = 0.9;

/// Placement class of a card relative to its section's current row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardClass {
    /// Above the current card
    Prev,
    Active,
    /// Below the current card
    Next,
}

impl CardClass {
    pub fn of(card: usize, current: usize) -> Self {
        use std::cmp::Ordering;
        match card.cmp(&current) {
            Ordering::Less => CardClass::Prev,
            Ordering::Equal => CardClass::Active,
            Ordering::Greater => CardClass::Next,
        }
    }

    /// CSS class name
    pub fn as_str(&self) -> &'static str {
        match self {
            CardClass::Prev => "prev",
            CardClass::Active => "active",
            CardClass::Next => "next",
        }
    }

    pub const ALL: [CardClass; 3] = [CardClass::Prev, CardClass::Active, CardClass::Next];
}

/// One section as it should appear
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    /// Horizontal offset in percent of the viewport width
    pub offset_percent: i64,
    pub active: bool,
    pub cards: Vec<CardClass>,
}

impl SectionView {
    pub fn scale(&self) -> f32 {
        if self.active {
            1.0
        } else {
            INACTIVE_SECTION_SCALE
        }
    }

    /// CSS `transform` value
    pub fn transform(&self) -> String {
        if self.active {
            "translateX(0) scale(1)".to_string()
        } else {
            format!(
                "translateX({}%) scale({})",
                self.offset_percent, INACTIVE_SECTION_SCALE
            )
        }
    }
}

/// Everything a renderer needs for one refresh
#[derive(Debug, Clone, PartialEq)]
pub struct DeckView {
    pub sections: Vec<SectionView>,
    /// Title of the active section
    pub title: Option<String>,
    /// Index of the highlighted position dot
    pub active_dot: usize,
}

impl DeckView {
    pub fn project(state: &NavigationState, layout: &DeckLayout) -> Self {
        let column = state.column();
        let sections = (0..layout.section_count())
            .map(|idx| {
                let current = state.row(idx).unwrap_or(0);
                SectionView {
                    offset_percent: (idx as i64 - column as i64) * 100,
                    active: idx == column,
                    cards: (0..layout.card_count(idx))
                        .map(|card| CardClass::of(card, current))
                        .collect(),
                }
            })
            .collect();

        Self {
            sections,
            title: layout.title(column).map(str::to_owned),
            active_dot: column,
        }
    }

    pub fn active_section(&self) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.active)
    }
}

/// Presentation side of the deck. Implemented per platform.
pub trait ViewRenderer {
    fn render(&mut self, view: &DeckView);
}

/// Renderer that only logs, for native runs
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: usize,
}

impl ViewRenderer for LogRenderer {
    fn render(&mut self, view: &DeckView) {
        self.frames += 1;
        let row = view
            .active_section()
            .and_then(|s| s.cards.iter().position(|c| *c == CardClass::Active));
        log::info!(
            "render #{}: section {} ({}), card {:?}",
            self.frames,
            view.active_dot,
            view.title.as_deref().unwrap_or("untitled"),
            row
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{SectionLayout, Step};

    fn layout() -> DeckLayout {
        DeckLayout::new(vec![
            SectionLayout::new("About", 3),
            SectionLayout::new("Experience", 4),
            SectionLayout::new("Contact", 1),
        ])
    }

    #[test]
    fn test_initial_projection() {
        let layout = layout();
        let view = DeckView::project(&NavigationState::new(&layout), &layout);

        assert_eq!(view.title.as_deref(), Some("About"));
        assert_eq!(view.active_dot, 0);
        let offsets: Vec<_> = view.sections.iter().map(|s| s.offset_percent).collect();
        assert_eq!(offsets, vec![0, 100, 200]);
        assert_eq!(
            view.sections[0].cards,
            vec![CardClass::Active, CardClass::Next, CardClass::Next]
        );
        assert!(view.sections[0].active);
        assert!(!view.sections[1].active);
    }

    #[test]
    fn test_projection_after_moves() {
        let layout = layout();
        let mut state = NavigationState::new(&layout);
        state.move_column(Step::Next, &layout);
        state.move_row(Step::Next, &layout);
        state.move_row(Step::Next, &layout);

        let view = DeckView::project(&state, &layout);
        assert_eq!(view.title.as_deref(), Some("Experience"));
        assert_eq!(view.active_dot, 1);
        assert_eq!(view.sections[0].offset_percent, -100);
        assert_eq!(view.sections[2].offset_percent, 100);
        assert_eq!(
            view.sections[1].cards,
            vec![CardClass::Prev, CardClass::Prev, CardClass::Active, CardClass::Next]
        );
        // Other sections keep their own row
        assert_eq!(view.sections[0].cards[0], CardClass::Active);
    }

    #[test]
    fn test_transforms() {
        let layout = layout();
        let view = DeckView::project(&NavigationState::new(&layout), &layout);
        assert_eq!(view.sections[0].transform(), "translateX(0) scale(1)");
        assert_eq!(view.sections[1].transform(), "translateX(100%) scale(0.9)");
        assert_eq!(view.sections[1].scale(), INACTIVE_SECTION_SCALE);
    }

    #[test]
    fn test_card_class_names() {
        let names: Vec<_> = CardClass::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["prev", "active", "next"]);
    }

    #[test]
    fn test_empty_layout_projects_nothing() {
        let layout = DeckLayout::default();
        let view = DeckView::project(&NavigationState::new(&layout), &layout);
        assert!(view.sections.is_empty());
        assert_eq!(view.title, None);
        assert!(view.active_section().is_none());
    }
}
