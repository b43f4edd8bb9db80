//! Move notation: faces, moves, and conversions to and from text.
//!
//! A token is a face letter optionally followed by `'` (counter-clockwise)
//! or `2` (half turn), e.g. `R`, `U'`, `F2`. The lowercase `y` token rotates
//! the whole cube around the vertical axis. Tokens are whitespace separated
//! and case-sensitive.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// One of the six physical faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Face {
    U,
    F,
    L,
    B,
    R,
    D,
}

impl Face {
    /// Faces in storage order, which is also the facelet text order.
    pub const ALL: [Face; 6] = [Face::U, Face::F, Face::L, Face::B, Face::R, Face::D];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::F => 'F',
            Face::L => 'L',
            Face::B => 'B',
            Face::R => 'R',
            Face::D => 'D',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Face> {
        match letter {
            'U' => Some(Face::U),
            'F' => Some(Face::F),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            'R' => Some(Face::R),
            'D' => Some(Face::D),
            _ => None,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What a move acts on: a physical face, or the whole cube (`y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Face(Face),
    Y,
}

impl Layer {
    pub const fn letter(self) -> char {
        match self {
            Layer::Face(face) => face.letter(),
            Layer::Y => 'y',
        }
    }

    const fn from_letter(letter: char) -> Option<Layer> {
        match letter {
            'y' => Some(Layer::Y),
            _ => match Face::from_letter(letter) {
                Some(face) => Some(Layer::Face(face)),
                None => None,
            },
        }
    }
}

/// A single move. `double` wins over `invert` when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub layer: Layer,
    pub invert: bool,
    pub double: bool,
}

impl Move {
    /// The `y` whole-cube rotation.
    pub const Y: Move = Move {
        layer: Layer::Y,
        invert: false,
        double: false,
    };

    pub const fn new(layer: Layer, invert: bool, double: bool) -> Self {
        Self {
            layer,
            invert,
            double,
        }
    }

    /// Quarter turn clockwise.
    pub const fn cw(face: Face) -> Self {
        Self::new(Layer::Face(face), false, false)
    }

    /// Quarter turn counter-clockwise.
    pub const fn ccw(face: Face) -> Self {
        Self::new(Layer::Face(face), true, false)
    }

    /// Half turn.
    pub const fn half(face: Face) -> Self {
        Self::new(Layer::Face(face), false, true)
    }

    /// Number of clockwise quarter turns this move amounts to.
    #[inline]
    pub const fn quarter_turns(self) -> usize {
        if self.double {
            2
        } else if self.invert {
            3
        } else {
            1
        }
    }

    /// The move that undoes this one. A half turn keeps `double` set.
    pub const fn inverse(self) -> Self {
        Self::new(self.layer, !self.invert, self.double)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.layer.letter())?;
        if self.double {
            write!(f, "2")
        } else if self.invert {
            write!(f, "'")
        } else {
            Ok(())
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        let invalid = || Error::InvalidNotation {
            token: token.to_string(),
        };

        let mut chars = token.chars();
        let layer = chars
            .next()
            .and_then(Layer::from_letter)
            .ok_or_else(invalid)?;

        // modifiers may only be primes and twos; repeated primes read as one
        let suffix = chars.as_str();
        if !suffix.chars().all(|c| c == '\'' || c == '2') {
            return Err(invalid());
        }

        Ok(Move::new(layer, suffix.contains('\''), suffix.contains('2')))
    }
}

/// Parses a whitespace separated move sequence.
///
/// Fails on the first malformed token, so callers can parse before mutating
/// anything.
pub fn parse(text: &str) -> Result<Vec<Move>> {
    text.split_whitespace().map(str::parse).collect()
}

/// Formats a move sequence as space separated tokens.
pub fn serialize(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the sequence that undoes `moves`.
pub fn invert(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}
