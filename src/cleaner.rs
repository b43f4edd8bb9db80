//! Collapses adjacent moves on the same layer.
//!
//! The reduction keeps a stack of output moves. Each incoming move is merged
//! with the top of the stack when both turn the same layer; a merge that
//! cancels pops the stack, which can expose a new same-layer neighbor for the
//! next incoming move. `R U U' R'` therefore cleans to nothing.

use crate::error::Result;
use crate::notation::{self, Layer, Move};

/// How far a move turns its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Normal,
    Prime,
    Double,
}

impl Turn {
    fn of(mv: Move) -> Self {
        if mv.double {
            Turn::Double
        } else if mv.invert {
            Turn::Prime
        } else {
            Turn::Normal
        }
    }

    fn on(self, layer: Layer) -> Move {
        match self {
            Turn::Normal => Move::new(layer, false, false),
            Turn::Prime => Move::new(layer, true, false),
            Turn::Double => Move::new(layer, false, true),
        }
    }
}

/// `COMBINE[first][second]`, `None` when the pair cancels.
const COMBINE: [[Option<Turn>; 3]; 3] = [
    // Normal followed by Normal, Prime, Double
    [Some(Turn::Double), None, Some(Turn::Prime)],
    // Prime
    [None, Some(Turn::Double), Some(Turn::Normal)],
    // Double
    [Some(Turn::Prime), Some(Turn::Normal), None],
];

fn combine(first: Turn, second: Turn) -> Option<Turn> {
    COMBINE[first as usize][second as usize]
}

/// Merges and cancels adjacent same-layer moves until no two neighbors share
/// a layer.
pub fn clean_moves(moves: &[Move]) -> Vec<Move> {
    let mut out: Vec<Move> = Vec::with_capacity(moves.len());
    for &mv in moves {
        match out.last() {
            Some(&top) if top.layer == mv.layer => {
                out.pop();
                if let Some(turn) = combine(Turn::of(top), Turn::of(mv)) {
                    out.push(turn.on(mv.layer));
                }
            }
            _ => out.push(Turn::of(mv).on(mv.layer)),
        }
    }
    out
}

/// Cleans a move string. Fails only if the text does not parse.
pub fn clean(text: &str) -> Result<String> {
    let moves = notation::parse(text)?;
    Ok(notation::serialize(&clean_moves(&moves)))
}
