//! Reachability checks on a cube state.
//!
//! A state is reachable from solved by legal moves exactly when:
//! - every color appears nine times and the centers are distinct,
//! - each corner and edge position holds a real piece, each piece once,
//! - the corner twists sum to 0 mod 3 and the edge flips to 0 mod 2,
//! - the corner and edge permutations have the same parity.
//!
//! Pieces are identified by center colors, so a reoriented cube (after `y`)
//! is analyzed the same way as one in the standard orientation.

use itertools::Itertools;

use crate::color::Color;
use crate::cube::Cube;
use crate::error::{Error, Result};
use crate::notation::Face;

use Face::{B, D, F, L, R, U};

/// A sticker position: face, row, column.
pub type Facelet = (Face, usize, usize);

/// Corner positions URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB. Each corner's
/// stickers are listed clockwise starting from its U or D sticker.
pub const CORNER_FACELETS: [[Facelet; 3]; 8] = [
    [(U, 2, 2), (R, 0, 0), (F, 0, 2)],
    [(U, 2, 0), (F, 0, 0), (L, 0, 2)],
    [(U, 0, 0), (L, 0, 0), (B, 0, 2)],
    [(U, 0, 2), (B, 0, 0), (R, 0, 2)],
    [(D, 0, 2), (F, 2, 2), (R, 2, 0)],
    [(D, 0, 0), (L, 2, 2), (F, 2, 0)],
    [(D, 2, 0), (B, 2, 2), (L, 2, 0)],
    [(D, 2, 2), (R, 2, 2), (B, 2, 0)],
];

/// Edge positions UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR. The first
/// sticker is the reference sticker for flip.
pub const EDGE_FACELETS: [[Facelet; 2]; 12] = [
    [(U, 1, 2), (R, 0, 1)],
    [(U, 2, 1), (F, 0, 1)],
    [(U, 1, 0), (L, 0, 1)],
    [(U, 0, 1), (B, 0, 1)],
    [(D, 1, 2), (R, 2, 1)],
    [(D, 0, 1), (F, 2, 1)],
    [(D, 1, 0), (L, 2, 1)],
    [(D, 2, 1), (B, 2, 1)],
    [(F, 1, 2), (R, 1, 0)],
    [(F, 1, 0), (L, 1, 2)],
    [(B, 1, 2), (L, 1, 0)],
    [(B, 1, 0), (R, 1, 2)],
];

/// The cube read as a permutation of pieces.
///
/// `corner_permutation[i]` is the home position of the corner now at
/// position `i`; likewise for edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceState {
    pub corner_permutation: [usize; 8],
    pub corner_twist: [u8; 8],
    pub edge_permutation: [usize; 12],
    pub edge_flip: [u8; 12],
}

impl PieceState {
    /// True for an odd corner permutation.
    pub fn corner_parity(&self) -> bool {
        is_odd(&self.corner_permutation)
    }

    /// True for an odd edge permutation.
    pub fn edge_parity(&self) -> bool {
        is_odd(&self.edge_permutation)
    }

    pub fn total_twist(&self) -> u32 {
        self.corner_twist.iter().map(|&t| u32::from(t)).sum::<u32>() % 3
    }

    pub fn total_flip(&self) -> u32 {
        self.edge_flip.iter().map(|&f| u32::from(f)).sum::<u32>() % 2
    }
}

fn is_odd(permutation: &[usize]) -> bool {
    let inversions = permutation
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count();
    inversions % 2 == 1
}

/// Reads the piece permutation and orientation of a cube.
///
/// Fails if centers repeat or some position holds a color combination that
/// is not a piece, or if a piece appears twice.
pub fn analyze(cube: &Cube) -> Result<PieceState> {
    let center = |face: Face| cube.sticker(face, 1, 1);
    let read = |(face, row, col): Facelet| cube.sticker(face, row, col);

    if !Face::ALL.iter().map(|&face| center(face)).all_unique() {
        return Err(Error::Unsolvable("two centers share a color".to_string()));
    }

    let up = center(U);
    let down = center(D);

    let mut corner_permutation = [0; 8];
    let mut corner_twist = [0; 8];
    for (position, &facelets) in CORNER_FACELETS.iter().enumerate() {
        let colors = facelets.map(read);
        let twist = colors
            .iter()
            .position(|&c| c == up || c == down)
            .ok_or_else(|| invalid_piece("corner", position))?;
        let turned = [colors[twist], colors[(twist + 1) % 3], colors[(twist + 2) % 3]];
        let home = CORNER_FACELETS
            .iter()
            .position(|&home| home.map(|(face, _, _)| center(face)) == turned)
            .ok_or_else(|| invalid_piece("corner", position))?;

        corner_permutation[position] = home;
        corner_twist[position] = twist as u8;
    }

    let mut edge_permutation = [0; 12];
    let mut edge_flip = [0; 12];
    for (position, &facelets) in EDGE_FACELETS.iter().enumerate() {
        let colors = facelets.map(read);
        let (home, flip) = EDGE_FACELETS
            .iter()
            .enumerate()
            .find_map(|(home, &facelets)| {
                let [first, second] = facelets.map(|(face, _, _)| center(face));
                if colors == [first, second] {
                    Some((home, 0))
                } else if colors == [second, first] {
                    Some((home, 1))
                } else {
                    None
                }
            })
            .ok_or_else(|| invalid_piece("edge", position))?;

        edge_permutation[position] = home;
        edge_flip[position] = flip;
    }

    if !corner_permutation.iter().all_unique() {
        return Err(Error::Unsolvable("a corner piece appears twice".to_string()));
    }
    if !edge_permutation.iter().all_unique() {
        return Err(Error::Unsolvable("an edge piece appears twice".to_string()));
    }

    Ok(PieceState {
        corner_permutation,
        corner_twist,
        edge_permutation,
        edge_flip,
    })
}

fn invalid_piece(kind: &str, position: usize) -> Error {
    Error::Unsolvable(format!("{kind} position {position} does not hold a valid piece"))
}

/// Checks that the cube could have been reached from solved by legal moves.
pub fn check(cube: &Cube) -> Result<()> {
    let mut counts = [0usize; 6];
    for color in cube.faces().iter().flatten().flatten() {
        counts[color.index()] += 1;
    }
    for (color, &count) in Color::ALL.iter().zip(counts.iter()) {
        if count != 9 {
            return Err(Error::Unsolvable(format!(
                "color {color} appears {count} times"
            )));
        }
    }

    let state = analyze(cube)?;
    if state.total_twist() != 0 {
        return Err(Error::Unsolvable("a corner is twisted".to_string()));
    }
    if state.total_flip() != 0 {
        return Err(Error::Unsolvable("an edge is flipped".to_string()));
    }
    if state.corner_parity() != state.edge_parity() {
        return Err(Error::Unsolvable(
            "corner and edge permutation parities differ".to_string(),
        ));
    }
    Ok(())
}
