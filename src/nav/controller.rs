//! Deck controller
//!
//! Owns the navigation state and the renderer. Every input event becomes at
//! most one move, and the renderer only runs when a move was accepted.

use super::Direction;
use super::gesture::GestureTracker;
use super::state::{DeckLayout, NavigationState};
use crate::view::{DeckView, ViewRenderer};

pub struct Deck<R: ViewRenderer> {
    layout: DeckLayout,
    state: NavigationState,
    gesture: GestureTracker,
    renderer: R,
    /// Input is ignored while disabled (e.g. during the blaster game)
    enabled: bool,
}

impl<R: ViewRenderer> Deck<R> {
    /// Build the deck and perform the initial render
    pub fn new(layout: DeckLayout, renderer: R) -> Self {
        Self::with_threshold(layout, renderer, crate::consts::TAP_THRESHOLD)
    }

    pub fn with_threshold(layout: DeckLayout, renderer: R, tap_threshold: f32) -> Self {
        let state = NavigationState::new(&layout);
        let mut deck = Self {
            layout,
            state,
            gesture: GestureTracker::new(tap_threshold),
            renderer,
            enabled: true,
        };
        deck.refresh();
        deck
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn layout(&self) -> &DeckLayout {
        &self.layout
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current projection of the state
    pub fn view(&self) -> DeckView {
        DeckView::project(&self.state, &self.layout)
    }

    /// Push the current state to the renderer unconditionally
    pub fn refresh(&mut self) {
        let view = self.view();
        self.renderer.render(&view);
    }

    /// Touch start / mouse down
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.gesture.begin(x, y);
    }

    /// Touch end / mouse up. Returns whether the deck moved.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        match self.gesture.finish(x, y) {
            Some(direction) => self.dispatch(direction),
            None => false,
        }
    }

    /// Key down. Returns whether the deck moved.
    pub fn key_down(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(direction) => self.dispatch(direction),
            None => false,
        }
    }

    /// Apply one direction and re-render if it was accepted
    pub fn dispatch(&mut self, direction: Direction) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.state.apply(direction, &self.layout) {
            return false;
        }
        debug_assert!(self.state.is_within(&self.layout));
        log::debug!(
            "deck: {:?} -> column {} row {}",
            direction,
            self.state.column(),
            self.state.current_row()
        );
        self.refresh();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::SectionLayout;

    #[derive(Default)]
    struct Recorder {
        views: Vec<DeckView>,
    }

    impl ViewRenderer for Recorder {
        fn render(&mut self, view: &DeckView) {
            self.views.push(view.clone());
        }
    }

    fn deck(counts: &[usize]) -> Deck<Recorder> {
        Deck::new(DeckLayout::from_card_counts(counts), Recorder::default())
    }

    #[test]
    fn test_initial_render() {
        let deck = deck(&[2, 2]);
        assert_eq!(deck.renderer().views.len(), 1);
        assert_eq!(deck.renderer().views[0].active_dot, 0);
    }

    #[test]
    fn test_renders_only_accepted_moves() {
        let mut deck = deck(&[2, 3]);
        assert!(!deck.key_down("ArrowLeft"));
        assert!(!deck.key_down("ArrowUp"));
        assert_eq!(deck.renderer().views.len(), 1);

        assert!(deck.key_down("ArrowRight"));
        assert_eq!(deck.renderer().views.len(), 2);
        assert!(!deck.key_down("ArrowRight"));
        assert_eq!(deck.renderer().views.len(), 2);

        assert!(deck.key_down("ArrowDown"));
        let last = deck.renderer().views.last().unwrap();
        assert_eq!(last.active_dot, 1);
        assert_eq!(last.sections[1].cards[1], crate::view::CardClass::Active);
    }

    #[test]
    fn test_swipe_left_moves_to_next_section() {
        let mut deck = deck(&[1, 1, 1]);
        deck.pointer_down(400.0, 300.0);
        assert!(deck.pointer_up(250.0, 310.0));
        assert_eq!(deck.state().column(), 1);
    }

    #[test]
    fn test_tap_does_nothing() {
        let mut deck = deck(&[1, 1]);
        deck.pointer_down(100.0, 100.0);
        assert!(!deck.pointer_up(110.0, 95.0));
        assert_eq!(deck.state().column(), 0);
        assert_eq!(deck.renderer().views.len(), 1);
    }

    #[test]
    fn test_swipe_up_advances_card() {
        let mut deck = deck(&[3]);
        deck.pointer_down(200.0, 600.0);
        assert!(deck.pointer_up(205.0, 400.0));
        assert_eq!(deck.state().current_row(), 1);
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut deck = deck(&[2]);
        assert!(!deck.key_down("Escape"));
        assert_eq!(deck.renderer().views.len(), 1);
    }

    #[test]
    fn test_disabled_deck_ignores_input() {
        let mut deck = deck(&[2, 2]);
        deck.set_enabled(false);
        assert!(!deck.key_down("ArrowRight"));
        deck.pointer_down(300.0, 0.0);
        assert!(!deck.pointer_up(100.0, 0.0));
        assert_eq!(deck.state().column(), 0);

        deck.set_enabled(true);
        assert!(deck.key_down("ArrowRight"));
        assert_eq!(deck.state().column(), 1);
    }

    #[test]
    fn test_title_follows_column() {
        let layout = DeckLayout::new(vec![
            SectionLayout::new("About", 1),
            SectionLayout::new("Skills", 1),
        ]);
        let mut deck = Deck::new(layout, Recorder::default());
        deck.dispatch(Direction::NextColumn);
        let last = deck.renderer().views.last().unwrap();
        assert_eq!(last.title.as_deref(), Some("Skills"));
    }

    #[test]
    fn test_zero_length_tap_never_moves() {
        let settings = crate::Settings::from_json(r#"{ "tap_threshold": 0.0 }"#);
        let mut deck = Deck::with_threshold(
            DeckLayout::from_card_counts(&[3, 3]),
            Recorder::default(),
            settings.tap_threshold,
        );
        deck.pointer_down(100.0, 100.0);
        assert!(!deck.pointer_up(100.0, 100.0));
        assert_eq!(deck.state().current_row(), 0);
        assert_eq!(deck.renderer().views.len(), 1);
    }

    #[test]
    fn test_custom_threshold() {
        let mut deck = Deck::with_threshold(
            DeckLayout::from_card_counts(&[1, 1]),
            Recorder::default(),
            20.0,
        );
        deck.pointer_down(100.0, 100.0);
        assert!(deck.pointer_up(70.0, 100.0));
    }
}
