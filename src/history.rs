//! A cube that remembers the moves applied to it.

use crate::cube::{Cube, MoveEngine};
use crate::error::Result;
use crate::notation::{self, Move};

/// A cube paired with the trace of recorded moves.
///
/// Piece lookups go through [`MoveEngine::apply_unrecorded`] and never touch
/// the trace.
#[derive(Debug, Clone, Default)]
pub struct HistoryCube {
    cube: Cube,
    trace: Vec<Move>,
}

impl HistoryCube {
    /// Starts recording from `cube` with an empty trace.
    pub fn new(cube: Cube) -> Self {
        Self {
            cube,
            trace: Vec::new(),
        }
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn trace(&self) -> &[Move] {
        &self.trace
    }

    pub fn into_trace(self) -> Vec<Move> {
        self.trace
    }

    /// Applies moves and appends them to the trace.
    pub fn apply(&mut self, moves: &[Move]) {
        self.apply_with_history(moves, true);
    }

    /// Parses, applies and records a move string. Nothing happens on a parse
    /// error.
    pub fn apply_str(&mut self, text: &str) -> Result<()> {
        let moves = notation::parse(text)?;
        self.apply(&moves);
        Ok(())
    }

    /// Applies moves, appending them to the trace only when `record` is set.
    pub fn apply_with_history(&mut self, moves: &[Move], record: bool) {
        self.cube.apply(moves);
        if record {
            self.trace.extend_from_slice(moves);
        }
    }
}

impl MoveEngine for HistoryCube {
    fn cube(&self) -> &Cube {
        &self.cube
    }

    fn apply_unrecorded(&mut self, moves: &[Move]) {
        self.apply_with_history(moves, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::Color;
    use crate::locator::PieceLocator;
    use crate::notation::{serialize, Face};

    #[test]
    fn test_apply_records_in_order() {
        let mut history = HistoryCube::new(Cube::new());
        history.apply_str("R U").unwrap();
        history.apply_str("F'").unwrap();
        assert_eq!(serialize(history.trace()), "R U F'");
    }

    #[test]
    fn test_unrecorded_moves_change_cube_only() {
        let mut history = HistoryCube::new(Cube::new());
        history.apply_with_history(&notation::parse("R").unwrap(), false);
        assert!(history.trace().is_empty());
        assert!(!history.cube().is_solved());
    }

    #[test]
    fn test_lookups_leave_trace_and_cube_alone() {
        let mut start = Cube::new();
        start.apply_str("L2 D F' R").unwrap();

        let mut history = HistoryCube::new(start);
        history.apply_str("U").unwrap();
        let before = *history.cube();

        let expected = history.cube().sticker(Face::U, 2, 1);
        assert_eq!(history.get_sticker("UF").unwrap(), expected);
        history.get_corner("DBL").unwrap();
        history.get_edge("BR").unwrap();

        assert_eq!(*history.cube(), before);
        assert_eq!(serialize(history.trace()), "U");
    }

    #[test]
    fn test_failed_parse_records_nothing() {
        let mut history = HistoryCube::new(Cube::new());
        assert!(history.apply_str("R Z").is_err());
        assert!(history.trace().is_empty());
        assert_eq!(history.cube().sticker(Face::F, 0, 2), Color::Green);
    }
}
