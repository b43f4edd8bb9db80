//! Layer-by-layer Rubik's cube solver library.
//!
//! Models a 3x3 cube, applies move notation to it, finds pieces wherever
//! they sit, and produces a full solving sequence with a fixed
//! layer-by-layer method.
//!
//! The functions at the crate root are the whole surface a front end needs.
//! Each caller owns its own [`Cube`]; nothing here is global.

pub mod cleaner;
pub mod color;
pub mod cube;
pub mod error;
pub mod history;
pub mod invariants;
pub mod locator;
pub mod notation;
pub mod pieces;
pub mod scramble;
pub mod solver;

use std::collections::BTreeMap;

use serde::Serialize;

pub use color::Color;
pub use cube::{Cube, Grid, MoveEngine, SIZE};
pub use error::{Error, Result};
pub use history::HistoryCube;
pub use locator::PieceLocator;
pub use notation::{Face, Layer, Move};
pub use solver::{Solution, Stage, StageReport};

/// Face grids and the solved flag, ready for display or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CubeState {
    pub faces: BTreeMap<Face, Grid>,
    pub solved: bool,
}

/// Creates a solved cube. Only size 3 exists.
pub fn create_cube(size: usize) -> Result<Cube> {
    if size != SIZE {
        return Err(Error::UnsupportedSize(size));
    }
    Ok(Cube::new())
}

/// Parses `text` and applies it. On a parse error the cube is unchanged.
pub fn apply(cube: &mut Cube, text: &str) -> Result<()> {
    cube.apply_str(text)
}

pub fn read_state(cube: &Cube) -> CubeState {
    CubeState {
        faces: Face::ALL
            .iter()
            .map(|&face| (face, *cube.face(face)))
            .collect(),
        solved: cube.is_solved(),
    }
}

pub fn is_solved(cube: &Cube) -> bool {
    cube.is_solved()
}

/// Cleaned moves that solve `cube`, which is left untouched.
pub fn generate_solution(cube: &Cube) -> Result<Vec<Move>> {
    solver::generate_solution(cube)
}
