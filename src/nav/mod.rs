//! Deck navigation
//!
//! The deck is a row of sections (columns), each holding a vertical stack of
//! cards (rows). This module is pure: no DOM, no rendering.
//! - `gesture`: pointer displacement -> direction
//! - `state`: bounds-checked (column, row) state machine
//! - `controller`: owns the state and drives a `ViewRenderer`

pub mod controller;
pub mod gesture;
pub mod state;

pub use controller::Deck;
pub use gesture::{GestureTracker, classify, classify_with_threshold};
pub use state::{DeckLayout, NavigationState, SectionLayout};


/// Which way along an axis a move goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Previous,
    Next,
}

impl Step {
    /// Apply this step to an index. `None` when it would go below zero.
    #[inline]
    pub fn apply(self, index: usize) -> Option<usize> {
        match self {
            Step::Previous => index.checked_sub(1),
            Step::Next => index.checked_add(1),
        }
    }
}

/// A discrete navigation request, produced by a classified gesture or an arrow key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    PreviousColumn,
    NextColumn,
    PreviousRow,
    NextRow,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Direction::NextColumn),
            "ArrowLeft" => Some(Direction::PreviousColumn),
            "ArrowDown" => Some(Direction::NextRow),
            "ArrowUp" => Some(Direction::PreviousRow),
            _ => None,
        }
    }

    pub fn step(self) -> Step {
        match self {
            Direction::PreviousColumn | Direction::PreviousRow => Step::Previous,
            Direction::NextColumn | Direction::NextRow => Step::Next,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::PreviousColumn | Direction::NextColumn)
    }
}
