//! Deck layout and navigation state
//!
//! The layout is read once at startup. The state holds the active column and
//! one remembered row per column; moves that would leave the valid range are
//! rejected outright, never clamped.

use serde::{Deserialize, Serialize};

use super::{Direction, Step};

/// One section (column) of the deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    /// Shown in the page header while this section is active
    pub title: String,
    /// Number of cards stacked vertically in this section
    pub card_count: usize,
}

impl SectionLayout {
    pub fn new(title: impl Into<String>, card_count: usize) -> Self {
        Self {
            title: title.into(),
            card_count,
        }
    }
}

/// Static shape of the deck
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckLayout {
    sections: Vec<SectionLayout>,
}

impl DeckLayout {
    pub fn new(sections: Vec<SectionLayout>) -> Self {
        Self { sections }
    }

    /// Untitled sections with the given card counts
    pub fn from_card_counts(counts: &[usize]) -> Self {
        Self::new(counts.iter().map(|&n| SectionLayout::new("", n)).collect())
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Card count of a section; zero for an index past the end
    pub fn card_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.card_count)
    }

    pub fn title(&self, section: usize) -> Option<&str> {
        self.sections.get(section).map(|s| s.title.as_str())
    }

    pub fn sections(&self) -> &[SectionLayout] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Current position in the deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    column: usize,
    rows: Vec<usize>,
}

impl NavigationState {
    /// First section, first card everywhere
    pub fn new(layout: &DeckLayout) -> Self {
        Self {
            column: 0,
            rows: vec![0; layout.section_count()],
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Remembered row of any section
    pub fn row(&self, section: usize) -> Option<usize> {
        self.rows.get(section).copied()
    }

    /// Row of the active section (zero for an empty deck)
    pub fn current_row(&self) -> usize {
        self.row(self.column).unwrap_or(0)
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Move one section left or right. Returns whether the state changed.
    pub fn move_column(&mut self, step: Step, layout: &DeckLayout) -> bool {
        match step.apply(self.column) {
            Some(target) if target < layout.section_count() => {
                self.column = target;
                true
            }
            _ => false,
        }
    }

    /// Move one card up or down within the active section.
    ///
    /// The bound is the active section's card count at the time of the call.
    pub fn move_row(&mut self, step: Step, layout: &DeckLayout) -> bool {
        let card_count = layout.card_count(self.column);
        let Some(row) = self.rows.get_mut(self.column) else {
            return false;
        };
        match step.apply(*row) {
            Some(target) if target < card_count => {
                *row = target;
                true
            }
            _ => false,
        }
    }

    /// Apply a direction; at most one mutation
    pub fn apply(&mut self, direction: Direction, layout: &DeckLayout) -> bool {
        if direction.is_horizontal() {
            self.move_column(direction.step(), layout)
        } else {
            self.move_row(direction.step(), layout)
        }
    }

    /// True when every index is inside `layout`
    pub fn is_within(&self, layout: &DeckLayout) -> bool {
        if self.rows.len() != layout.section_count() {
            return false;
        }
        let column_ok = layout.is_empty() || self.column < layout.section_count();
        column_ok
            && self
                .rows
                .iter()
                .enumerate()
                .all(|(i, &row)| row == 0 || row < layout.card_count(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout(counts: &[usize]) -> DeckLayout {
        DeckLayout::from_card_counts(counts)
    }

    #[test]
    fn test_initial_state() {
        let layout = layout(&[4, 2, 3]);
        let state = NavigationState::new(&layout);
        assert_eq!(state.column(), 0);
        assert_eq!(state.rows(), &[0, 0, 0]);
        assert_eq!(state.current_row(), 0);
    }

    #[test]
    fn test_next_column_rejected_at_last_section() {
        let layout = layout(&[1, 1, 1]);
        let mut state = NavigationState::new(&layout);
        assert!(state.move_column(Step::Next, &layout));
        assert!(state.move_column(Step::Next, &layout));
        assert_eq!(state.column(), 2);

        assert!(!state.move_column(Step::Next, &layout));
        assert_eq!(state.column(), 2);
    }

    #[test]
    fn test_next_row_rejected_at_last_card() {
        let layout = layout(&[4]);
        let mut state = NavigationState::new(&layout);
        for _ in 0..3 {
            assert!(state.move_row(Step::Next, &layout));
        }
        assert_eq!(state.row(0), Some(3));

        assert!(!state.move_row(Step::Next, &layout));
        assert_eq!(state.row(0), Some(3));
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let layout = layout(&[2, 2]);
        let mut state = NavigationState::new(&layout);
        let before = state.clone();
        for _ in 0..10 {
            assert!(!state.move_column(Step::Previous, &layout));
            assert!(!state.move_row(Step::Previous, &layout));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_rows_are_remembered_per_column() {
        let layout = layout(&[3, 5]);
        let mut state = NavigationState::new(&layout);
        state.move_row(Step::Next, &layout);
        state.move_row(Step::Next, &layout);
        state.move_column(Step::Next, &layout);
        assert_eq!(state.current_row(), 0);
        state.move_row(Step::Next, &layout);
        state.move_column(Step::Previous, &layout);
        assert_eq!(state.rows(), &[2, 1]);
        assert_eq!(state.current_row(), 2);
    }

    #[test]
    fn test_row_bound_uses_active_section() {
        // Section 0 has one card, section 1 has three
        let layout = layout(&[1, 3]);
        let mut state = NavigationState::new(&layout);
        assert!(!state.move_row(Step::Next, &layout));
        state.move_column(Step::Next, &layout);
        assert!(state.move_row(Step::Next, &layout));
        assert!(state.move_row(Step::Next, &layout));
        assert!(!state.move_row(Step::Next, &layout));
        assert_eq!(state.rows(), &[0, 2]);
    }

    #[test]
    fn test_section_without_cards_rejects_row_moves() {
        let layout = layout(&[0, 2]);
        let mut state = NavigationState::new(&layout);
        assert!(!state.move_row(Step::Next, &layout));
        assert!(!state.move_row(Step::Previous, &layout));
        assert_eq!(state.rows(), &[0, 0]);
    }

    #[test]
    fn test_empty_layout_refuses_everything() {
        let layout = DeckLayout::default();
        let mut state = NavigationState::new(&layout);
        for dir in [
            Direction::NextColumn,
            Direction::PreviousColumn,
            Direction::NextRow,
            Direction::PreviousRow,
        ] {
            assert!(!state.apply(dir, &layout));
        }
        assert_eq!(state.column(), 0);
        assert!(state.rows().is_empty());
        assert!(state.is_within(&layout));
    }

    #[test]
    fn test_apply_routes_by_axis() {
        let layout = layout(&[2, 2]);
        let mut state = NavigationState::new(&layout);
        assert!(state.apply(Direction::NextRow, &layout));
        assert_eq!(state.column(), 0);
        assert_eq!(state.row(0), Some(1));
        assert!(state.apply(Direction::NextColumn, &layout));
        assert_eq!(state.column(), 1);
        assert_eq!(state.row(1), Some(0));
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::PreviousColumn),
            Just(Direction::NextColumn),
            Just(Direction::PreviousRow),
            Just(Direction::NextRow),
        ]
    }

    proptest! {
        #[test]
        fn prop_moves_stay_in_bounds(
            counts in prop::collection::vec(1usize..6, 1..6),
            moves in prop::collection::vec(direction_strategy(), 0..200),
        ) {
            let layout = DeckLayout::from_card_counts(&counts);
            let mut state = NavigationState::new(&layout);
            for dir in moves {
                state.apply(dir, &layout);
                prop_assert!(state.column() < layout.section_count());
                for (i, &row) in state.rows().iter().enumerate() {
                    prop_assert!(row < layout.card_count(i));
                }
            }
        }

        #[test]
        fn prop_rejected_move_leaves_state_unchanged(
            counts in prop::collection::vec(1usize..6, 1..6),
            moves in prop::collection::vec(direction_strategy(), 0..100),
        ) {
            let layout = DeckLayout::from_card_counts(&counts);
            let mut state = NavigationState::new(&layout);
            for dir in moves {
                let before = state.clone();
                if !state.apply(dir, &layout) {
                    prop_assert_eq!(&state, &before);
                } else {
                    prop_assert_ne!(&state, &before);
                }
            }
        }
    }
}
