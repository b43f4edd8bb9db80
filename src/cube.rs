//! Cube state and the move engine.
//!
//! The cube is six 3x3 sticker grids stored in [`Face::ALL`] order. Grid
//! orientation is fixed so that every face-turn rule agrees:
//! - Side faces (F, L, B, R) are viewed from outside with U on top, so row 0
//!   borders U and row 2 borders D.
//! - U is viewed from above with B at the top: row 2 borders F, column 0
//!   borders L.
//! - D is viewed from below with F at the top: row 0 borders F, column 2
//!   borders R.
//! - Column 0 of R borders F, column 0 of B borders R, column 2 of L
//!   borders F.
//!
//! Only the U, D and F rings are written out. R, L and B turns reuse the F
//! ring by reorienting the whole cube with `y`, turning, and reorienting
//! back.

use std::fmt;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::invariants;
use crate::notation::{self, Face, Layer, Move};

/// Stickers per face edge.
pub const SIZE: usize = 3;

/// Total sticker count.
pub const STICKERS: usize = SIZE * SIZE * 6;

/// One face: `grid[row][col]`.
pub type Grid = [[Color; SIZE]; SIZE];

/// Solved color of each face, in [`Face::ALL`] order.
const SOLVED_COLORS: [Color; 6] = [
    Color::White,
    Color::Green,
    Color::Orange,
    Color::Blue,
    Color::Red,
    Color::Yellow,
];

/// For a `y` rotation, the face whose grid ends up at each position.
///
/// Indexed by destination face in [`Face::ALL`] order: the new F is the old
/// R, the new L is the old F, and so on. U and D keep their grids and are
/// spun in place separately.
const Y_SOURCE: [Face; 6] = [Face::U, Face::R, Face::F, Face::L, Face::B, Face::D];

/// Something that owns a cube and can turn it directly.
///
/// Piece lookup goes through this seam so that its temporary setup moves never
/// reach a move history.
pub trait MoveEngine {
    fn cube(&self) -> &Cube;

    /// Applies moves to the underlying cube without recording them anywhere.
    fn apply_unrecorded(&mut self, moves: &[Move]);
}

/// A 3x3 cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    faces: [Grid; 6],
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

impl Cube {
    /// Creates a solved cube with white up and green front.
    pub fn new() -> Self {
        Self {
            faces: SOLVED_COLORS.map(|color| [[color; SIZE]; SIZE]),
        }
    }

    #[inline]
    pub fn face(&self, face: Face) -> &Grid {
        &self.faces[face.index()]
    }

    #[inline]
    pub fn faces(&self) -> &[Grid; 6] {
        &self.faces
    }

    #[inline]
    pub fn sticker(&self, face: Face, row: usize, col: usize) -> Color {
        self.faces[face.index()][row][col]
    }

    /// Returns true when every face is a single color.
    pub fn is_solved(&self) -> bool {
        self.faces.iter().all(|grid| {
            let reference = grid[0][0];
            grid.iter().flatten().all(|&color| color == reference)
        })
    }

    /// Applies one move.
    pub fn apply_move(&mut self, mv: Move) {
        match mv.layer {
            Layer::Y => self.y_rotate(mv.quarter_turns()),
            Layer::Face(face) => {
                // counter-clockwise is three clockwise quarter turns
                for _ in 0..mv.quarter_turns() {
                    self.rotate_face(face);
                    self.swap_ring(face);
                }
            }
        }
    }

    /// Applies a move sequence in order.
    pub fn apply(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply_move(mv);
        }
    }

    /// Parses and applies a move string. Nothing is applied if parsing fails.
    pub fn apply_str(&mut self, text: &str) -> Result<()> {
        let moves = notation::parse(text)?;
        self.apply(&moves);
        Ok(())
    }

    /// Builds a cube from 54 color letters, faces in `U F L B R D` order, each
    /// row-major. Whitespace is ignored.
    ///
    /// The result is checked to be reachable from solved by legal moves.
    pub fn from_facelets(text: &str) -> Result<Self> {
        let letters: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if letters.len() != STICKERS {
            return Err(Error::InvalidFacelets(format!(
                "expected {} stickers but got {}",
                STICKERS,
                letters.len()
            )));
        }

        let mut faces = [[[Color::White; SIZE]; SIZE]; 6];
        for (i, &letter) in letters.iter().enumerate() {
            let color = Color::from_letter(letter).ok_or_else(|| {
                Error::InvalidFacelets(format!("unknown color letter {letter:?} at {i}"))
            })?;
            let face = i / (SIZE * SIZE);
            faces[face][(i / SIZE) % SIZE][i % SIZE] = color;
        }

        let cube = Self { faces };
        invariants::check(&cube)?;
        Ok(cube)
    }

    /// Inverse of [`Cube::from_facelets`], without whitespace.
    pub fn to_facelets(&self) -> String {
        self.faces
            .iter()
            .flatten()
            .flatten()
            .map(|color| color.letter())
            .collect()
    }

    /// Rotates a face grid 90 degrees clockwise.
    fn rotate_face(&mut self, face: Face) {
        let old = self.faces[face.index()];
        let grid = &mut self.faces[face.index()];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = old[SIZE - 1 - col][row];
            }
        }
    }

    /// Cycles the strip of stickers bordering `face` for one clockwise turn.
    fn swap_ring(&mut self, face: Face) {
        match face {
            Face::U => {
                let [f, l, b, r] = self.rows(0);
                self.set_rows(0, [r, f, l, b]);
            }
            Face::D => {
                let [f, l, b, r] = self.rows(SIZE - 1);
                self.set_rows(SIZE - 1, [l, b, r, f]);
            }
            Face::F => self.swap_front_ring(),
            Face::R => {
                self.y_rotate(1);
                self.swap_front_ring();
                self.y_rotate(3);
            }
            Face::L => {
                self.y_rotate(3);
                self.swap_front_ring();
                self.y_rotate(1);
            }
            Face::B => {
                self.y_rotate(2);
                self.swap_front_ring();
                self.y_rotate(2);
            }
        }
    }

    /// Row `row` of F, L, B and R, in that order.
    fn rows(&self, row: usize) -> [[Color; SIZE]; 4] {
        [Face::F, Face::L, Face::B, Face::R].map(|face| self.faces[face.index()][row])
    }

    fn set_rows(&mut self, row: usize, strips: [[Color; SIZE]; 4]) {
        for (face, strip) in [Face::F, Face::L, Face::B, Face::R].into_iter().zip(strips) {
            self.faces[face.index()][row] = strip;
        }
    }

    /// The F ring: U's bottom row, R's left column, D's top row and L's right
    /// column, cycled U -> R -> D -> L -> U.
    fn swap_front_ring(&mut self) {
        let up = self.faces[Face::U.index()];
        let right = self.faces[Face::R.index()];
        let down = self.faces[Face::D.index()];
        let left = self.faces[Face::L.index()];
        let last = SIZE - 1;

        for i in 0..SIZE {
            self.faces[Face::U.index()][last][i] = left[last - i][last];
            self.faces[Face::R.index()][i][0] = up[last][i];
            self.faces[Face::D.index()][0][i] = right[last - i][0];
            self.faces[Face::L.index()][i][last] = down[0][i];
        }
    }

    /// Reorients the whole cube around the vertical axis, `turns` times.
    ///
    /// Side grids are relabeled without changing; U spins clockwise and D
    /// counter-clockwise so they stay consistent with the new sides.
    fn y_rotate(&mut self, turns: usize) {
        for _ in 0..turns {
            let old = self.faces;
            self.faces = Y_SOURCE.map(|source| old[source.index()]);

            self.rotate_face(Face::U);
            for _ in 0..3 {
                self.rotate_face(Face::D);
            }
        }
    }
}

impl MoveEngine for Cube {
    fn cube(&self) -> &Cube {
        self
    }

    fn apply_unrecorded(&mut self, moves: &[Move]) {
        self.apply(moves);
    }
}

/// Renders the cube as an unfolded net: U on top, then L F R B, then D.
impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = " ".repeat(SIZE + 1);

        for row in self.face(Face::U) {
            write!(f, "{pad}")?;
            write_row(f, row)?;
            writeln!(f)?;
        }
        for row in 0..SIZE {
            for (i, face) in [Face::L, Face::F, Face::R, Face::B].into_iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write_row(f, &self.face(face)[row])?;
            }
            writeln!(f)?;
        }
        for row in self.face(Face::D) {
            write!(f, "{pad}")?;
            write_row(f, row)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[Color; SIZE]) -> fmt::Result {
    for color in cells {
        write!(f, "{color}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::notation::{invert, parse};

    fn any_face_move() -> impl Strategy<Value = Move> {
        (prop::sample::select(Face::ALL.to_vec()), 0..3usize).prop_map(|(face, modifier)| {
            match modifier {
                0 => Move::cw(face),
                1 => Move::ccw(face),
                _ => Move::half(face),
            }
        })
    }

    fn color_counts(cube: &Cube) -> [usize; 6] {
        let mut counts = [0; 6];
        for color in cube.faces().iter().flatten().flatten() {
            counts[color.index()] += 1;
        }
        counts
    }

    #[test]
    fn test_new_cube_is_solved() {
        let mut cube = Cube::new();
        assert!(cube.is_solved());
        cube.apply_str("").unwrap();
        assert!(cube.is_solved());
        assert_eq!(color_counts(&cube), [9; 6]);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for face in Face::ALL {
            let mut cube = Cube::new();
            cube.apply_str("R U F").unwrap();
            let before = cube;
            for _ in 0..4 {
                cube.apply_move(Move::cw(face));
            }
            assert_eq!(cube, before, "{face}4 should be the identity");
        }
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let mut cube = Cube::new();
        for i in 1..=6 {
            cube.apply_str("R U R' U'").unwrap();
            assert_eq!(cube.is_solved(), i == 6, "after {i} repetitions");
        }
    }

    #[test]
    fn test_front_turn_moves_expected_strips() {
        let mut cube = Cube::new();
        cube.apply_str("F").unwrap();
        assert_eq!(cube.face(Face::U)[2], [Color::Orange; 3]);
        assert_eq!(cube.face(Face::D)[0], [Color::Red; 3]);
        for row in 0..SIZE {
            assert_eq!(cube.sticker(Face::R, row, 0), Color::White);
            assert_eq!(cube.sticker(Face::L, row, 2), Color::Yellow);
        }
    }

    #[test]
    fn test_up_turn_brings_right_to_front() {
        let mut cube = Cube::new();
        cube.apply_str("U").unwrap();
        assert_eq!(cube.face(Face::F)[0], [Color::Red; 3]);
        assert_eq!(cube.face(Face::L)[0], [Color::Green; 3]);
        assert_eq!(cube.face(Face::B)[0], [Color::Orange; 3]);
        assert_eq!(cube.face(Face::R)[0], [Color::Blue; 3]);
    }

    #[test]
    fn test_down_turn_brings_left_to_front() {
        let mut cube = Cube::new();
        cube.apply_str("D").unwrap();
        assert_eq!(cube.face(Face::F)[2], [Color::Orange; 3]);
        assert_eq!(cube.face(Face::R)[2], [Color::Green; 3]);
    }

    #[test]
    fn test_right_turn_cycles_front_up_back_down() {
        let mut cube = Cube::new();
        cube.apply_str("R").unwrap();
        for row in 0..SIZE {
            assert_eq!(cube.sticker(Face::U, row, 2), Color::Green);
            assert_eq!(cube.sticker(Face::B, row, 0), Color::White);
            assert_eq!(cube.sticker(Face::D, row, 2), Color::Blue);
            assert_eq!(cube.sticker(Face::F, row, 2), Color::Yellow);
        }
        // the left column is untouched
        assert_eq!(cube.sticker(Face::U, 1, 0), Color::White);
    }

    #[test]
    fn test_left_turn_cycles_up_front_down_back() {
        let mut cube = Cube::new();
        cube.apply_str("L").unwrap();
        for row in 0..SIZE {
            assert_eq!(cube.sticker(Face::F, row, 0), Color::White);
            assert_eq!(cube.sticker(Face::D, row, 0), Color::Green);
            assert_eq!(cube.sticker(Face::B, row, 2), Color::Yellow);
            assert_eq!(cube.sticker(Face::U, row, 0), Color::Blue);
        }
    }

    #[test]
    fn test_back_turn_cycles_up_left_down_right() {
        let mut cube = Cube::new();
        cube.apply_str("B").unwrap();
        assert_eq!(cube.face(Face::U)[0], [Color::Red; 3]);
        assert_eq!(cube.face(Face::D)[2], [Color::Orange; 3]);
        for row in 0..SIZE {
            assert_eq!(cube.sticker(Face::L, row, 0), Color::White);
            assert_eq!(cube.sticker(Face::R, row, 2), Color::Yellow);
        }
    }

    #[test]
    fn test_y_relabels_sides() {
        let mut cube = Cube::new();
        cube.apply_move(Move::Y);
        assert!(cube.is_solved());
        assert_eq!(cube.sticker(Face::F, 1, 1), Color::Red);
        assert_eq!(cube.sticker(Face::L, 1, 1), Color::Green);
        assert_eq!(cube.sticker(Face::B, 1, 1), Color::Orange);
        assert_eq!(cube.sticker(Face::R, 1, 1), Color::Blue);
    }

    #[test]
    fn test_y_conjugates_right_into_front() {
        let mut turned = Cube::new();
        turned.apply_str("R").unwrap();

        let mut conjugated = Cube::new();
        conjugated.apply_str("y F y'").unwrap();

        assert_eq!(turned, conjugated);
    }

    #[test]
    fn test_failed_parse_leaves_cube_untouched() {
        let mut cube = Cube::new();
        assert!(cube.apply_str("R U Q").is_err());
        assert!(cube.is_solved());
    }

    #[test]
    fn test_facelets_roundtrip_scrambled() {
        let mut cube = Cube::new();
        cube.apply_str("R U2 F' L D B2 R' U").unwrap();
        let text = cube.to_facelets();
        assert_eq!(text.len(), STICKERS);
        assert_eq!(Cube::from_facelets(&text).unwrap(), cube);
    }

    #[test]
    fn test_facelets_rejects_bad_length_and_letters() {
        assert!(matches!(
            Cube::from_facelets("WWW"),
            Err(Error::InvalidFacelets(_))
        ));
        let mut text = Cube::new().to_facelets();
        text.replace_range(0..1, "X");
        assert!(matches!(
            Cube::from_facelets(&text),
            Err(Error::InvalidFacelets(_))
        ));
    }

    #[test]
    fn test_solved_facelets_snapshot() {
        insta::assert_snapshot!("solved_facelets", Cube::new().to_facelets());
    }

    #[test]
    fn test_net_after_front_turn_snapshot() {
        let mut cube = Cube::new();
        cube.apply_str("F").unwrap();
        insta::assert_snapshot!("net_after_front_turn", cube.to_string());
    }

    proptest! {
        #[test]
        fn prop_inverse_sequence_restores_state(
            setup in prop::collection::vec(any_face_move(), 0..20),
            moves in prop::collection::vec(any_face_move(), 0..40),
        ) {
            let mut cube = Cube::new();
            cube.apply(&setup);
            let before = cube;
            cube.apply(&moves);
            cube.apply(&invert(&moves));
            prop_assert_eq!(cube, before);
        }

        #[test]
        fn prop_moves_only_permute_stickers(moves in prop::collection::vec(any_face_move(), 0..40)) {
            let mut cube = Cube::new();
            cube.apply(&moves);
            prop_assert_eq!(color_counts(&cube), [9; 6]);
        }
    }

    #[test]
    fn test_y_sequences_invert_too() {
        let moves = parse("R y U' y2 F2 y' L").unwrap();
        let mut cube = Cube::new();
        cube.apply(&moves);
        cube.apply(&invert(&moves));
        assert_eq!(cube, Cube::new());
    }
}
