//! Piece lookup by temporary conjugation.
//!
//! To read a piece, the cube is turned so the piece lands in the canonical
//! slot (UF or UFR), the canonical stickers are read, and the setup is undone.
//! The net effect on the cube is nothing, and the turns go through
//! [`MoveEngine::apply_unrecorded`] so they never show up in a move history.

use crate::color::Color;
use crate::cube::MoveEngine;
use crate::error::{Error, Result};
use crate::notation::{invert, Face, Move};
use crate::pieces::{self, Slot};

/// Canonical edge cells: the U and F stickers of UF.
const EDGE_CELLS: [(Face, usize, usize); 2] = [(Face::U, 2, 1), (Face::F, 0, 1)];

/// Canonical corner cells: the U, F and R stickers of UFR.
const CORNER_CELLS: [(Face, usize, usize); 3] =
    [(Face::U, 2, 2), (Face::F, 0, 2), (Face::R, 0, 0)];

/// The colors of one piece, keyed by the face letters it was asked for with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceColors<const N: usize> {
    faces: [Face; N],
    colors: [Color; N],
}

pub type Edge = PieceColors<2>;
pub type Corner = PieceColors<3>;

impl<const N: usize> PieceColors<N> {
    /// Color of the sticker facing `face`, if the piece has one.
    pub fn get(&self, face: Face) -> Option<Color> {
        self.faces
            .iter()
            .position(|&f| f == face)
            .map(|i| self.colors[i])
    }

    /// Faces in label order.
    pub fn faces(&self) -> [Face; N] {
        self.faces
    }

    /// Colors in label order.
    pub fn colors(&self) -> [Color; N] {
        self.colors
    }

    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Returns true if the piece carries exactly these colors, in any order.
    pub fn has_colors(&self, wanted: [Color; N]) -> bool {
        wanted.iter().all(|&color| self.contains(color))
    }

    /// Re-keys the colors in the order of `order`.
    fn reorder(&self, order: [Face; N]) -> Option<Self> {
        let mut colors = self.colors;
        for (slot, &face) in colors.iter_mut().zip(order.iter()) {
            *slot = self.get(face)?;
        }
        Some(Self {
            faces: order,
            colors,
        })
    }
}

/// Observation-only piece queries for anything that can turn a cube.
pub trait PieceLocator: MoveEngine {
    /// Color of one sticker. The first letter of `label` names the face, the
    /// whole label names the piece, e.g. `"FUR"` is the F sticker of UFR.
    fn get_sticker(&mut self, label: &str) -> Result<Color> {
        let face = label.chars().next().and_then(Face::from_letter);
        let color = match (pieces::resolve(label), face) {
            (Some(Slot::Edge(_)), Some(face)) => self.get_edge(label)?.get(face),
            (Some(Slot::Corner(_)), Some(face)) => self.get_corner(label)?.get(face),
            _ => None,
        };
        color.ok_or_else(|| unknown(label))
    }

    /// Colors of the edge named by `label`, keyed in label order.
    fn get_edge(&mut self, label: &str) -> Result<Edge> {
        let Some(Slot::Edge(slot)) = pieces::resolve(label) else {
            return Err(unknown(label));
        };
        let colors = read_canonical(self, slot.setup(), EDGE_CELLS);
        let piece = PieceColors {
            faces: slot.faces(),
            colors,
        };
        piece
            .reorder(label_faces(label)?)
            .ok_or_else(|| unknown(label))
    }

    /// Colors of the corner named by `label`, keyed in label order.
    fn get_corner(&mut self, label: &str) -> Result<Corner> {
        let Some(Slot::Corner(slot)) = pieces::resolve(label) else {
            return Err(unknown(label));
        };
        let colors = read_canonical(self, slot.setup(), CORNER_CELLS);
        let piece = PieceColors {
            faces: slot.faces(),
            colors,
        };
        piece
            .reorder(label_faces(label)?)
            .ok_or_else(|| unknown(label))
    }
}

impl<T: MoveEngine + ?Sized> PieceLocator for T {}

fn unknown(label: &str) -> Error {
    Error::UnknownSticker {
        label: label.to_string(),
    }
}

fn label_faces<const N: usize>(label: &str) -> Result<[Face; N]> {
    let faces: Vec<Face> = label.chars().filter_map(Face::from_letter).collect();
    faces.try_into().map_err(|_| unknown(label))
}

/// Conjugates the piece into the canonical slot, reads `cells`, and undoes
/// the setup.
fn read_canonical<E, const N: usize>(
    engine: &mut E,
    setup: &[Move],
    cells: [(Face, usize, usize); N],
) -> [Color; N]
where
    E: MoveEngine + ?Sized,
{
    engine.apply_unrecorded(setup);
    let colors = cells.map(|(face, row, col)| engine.cube().sticker(face, row, col));
    engine.apply_unrecorded(&invert(setup));
    colors
}
