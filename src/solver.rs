//! Layer-by-layer solver.
//!
//! Seven stages run in order on a recording copy of the input cube. Each
//! stage matches the current pieces against a small case table and applies
//! a fixed algorithm. The algorithms are exact: later stages read the cube
//! in the orientation the earlier algorithms leave behind.
//!
//! Every loop is bounded. A stage that runs out of attempts, or finds no
//! matching piece, returns [`Error::StageStalled`] instead of spinning.

use std::fmt;

use log::{debug, info};

use crate::cleaner::clean_moves;
use crate::color::Color::{self, Blue, Green, Orange, Red, White, Yellow};
use crate::cube::Cube;
use crate::error::{Error, Result};
use crate::history::HistoryCube;
use crate::locator::PieceLocator;
use crate::notation::{serialize, Face, Move};

/// Bound on `U` (or `y`) realignment loops. Four quarter turns is a full
/// revolution, so a fifth can never help.
const ALIGN_LIMIT: usize = 4;

/// Bound on repeating the edge three-cycle in the last stage.
const EPLL_REPEAT_LIMIT: usize = 3;

/// Cross edges: where to look and how to bring the piece to UF.
const CROSS_EDGES: [(&str, &str); 12] = [
    ("UF", ""),
    ("UL", "U'"),
    ("UR", "U"),
    ("UB", "U2"),
    ("LB", "L U' L'"),
    ("LD", "L2 U'"),
    ("LF", "L' U' L"),
    ("RB", "R' U R"),
    ("RD", "R2 U"),
    ("RF", "R U R'"),
    ("DB", "B2 U2"),
    ("DF", "F2"),
];

const CROSS_COLORS: [Color; 4] = [Blue, Orange, Green, Red];

/// First-layer corners: where to look and how to bring the piece above DFR.
const FIRST_LAYER_CORNERS: [(&str, &str); 8] = [
    ("UFR", "U2 U2"),
    ("DFR", "R U R' U'"),
    ("DBR", "R' U R U"),
    ("URB", "U"),
    ("ULF", "U'"),
    ("UBL", "U2"),
    ("DFL", "L' U' L"),
    ("DBL", "L U L' U"),
];

const CORNER_COLORS: [(Color, Color); 4] = [
    (Green, Red),
    (Blue, Red),
    (Blue, Orange),
    (Green, Orange),
];

/// Middle-layer edges: where to look and how to bring the piece to UF.
const MIDDLE_EDGES: [(&str, &str); 8] = [
    ("UF", "U2 U2"),
    ("UR", "U"),
    ("UL", "U'"),
    ("UB", "U2"),
    ("RF", "R' F R F' R U R' U'"),
    ("LF", "L F' L' F L' U' L U"),
    ("RB", "R' U R B' R B R'"),
    ("LB", "L U' L' B L' B' L"),
];

const MIDDLE_COLORS: [(Color, Color); 4] = [
    (Green, Red),
    (Red, Blue),
    (Blue, Orange),
    (Orange, Green),
];

const EOLL_DOT: &str = "R U2 R2 F R F' U2 R' F R F'";
const EOLL_ANGLE: &str = "U F U R U' R' F'";
const EOLL_LINE: &str = "F R U R' U' F'";

const OCLL_SUNE: &str = "R U R' U R U2 R' U";
const OCLL_ANTISUNE: &str = "U R' U' R U' R' U2 R";
const OCLL_H: &str = "F R U R' U' R U R' U' R U R' U' F'";
const OCLL_HEADLIGHTS: &str = "R2 D' R U2 R' D R U2 R";
const OCLL_SIDEBARS: &str = "U' L F R' F' L' F R F'";
const OCLL_FISH: &str = "R' U2 R' D' R U2 R' D R2";
const OCLL_PI: &str = "U R U2 R2 U' R2 U' R2 U2 R";

const CPLL_SWAP: &str = "R' U L' U2 R U' R' U2 R L";

const EPLL_CYCLE: &str = "R U' R U R U R U' R' U' R2";

/// One solver stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Cross,
    FirstLayerCorners,
    MiddleEdges,
    Eoll,
    Ocll,
    Cpll,
    Epll,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Cross,
        Stage::FirstLayerCorners,
        Stage::MiddleEdges,
        Stage::Eoll,
        Stage::Ocll,
        Stage::Cpll,
        Stage::Epll,
    ];

    fn run(self, cube: &mut HistoryCube) -> Result<()> {
        match self {
            Stage::Cross => solve_cross(cube),
            Stage::FirstLayerCorners => solve_corners(cube),
            Stage::MiddleEdges => solve_middle_edges(cube),
            Stage::Eoll => solve_eoll(cube),
            Stage::Ocll => solve_ocll(cube),
            Stage::Cpll => solve_cpll(cube),
            Stage::Epll => solve_epll(cube),
        }
    }

    fn stalled(self) -> Error {
        Error::StageStalled { stage: self }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Cross => "cross",
            Stage::FirstLayerCorners => "first-layer corners",
            Stage::MiddleEdges => "middle-layer edges",
            Stage::Eoll => "EOLL",
            Stage::Ocll => "OCLL",
            Stage::Cpll => "CPLL",
            Stage::Epll => "EPLL",
        };
        f.write_str(name)
    }
}

/// The moves one stage contributed to the raw trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub moves: Vec<Move>,
}

/// A generated solution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    /// Every move the stages applied, in order.
    pub raw: Vec<Move>,
    pub stages: Vec<StageReport>,
    /// `raw` after collapsing adjacent same-layer moves.
    pub moves: Vec<Move>,
}

/// Solves a copy of `cube`. The caller's cube is not touched.
///
/// The cube must have white on U. It may be turned about the vertical axis;
/// the solution starts with the `y` turns that bring green to F.
pub fn solve(cube: &Cube) -> Result<Solution> {
    if cube.is_solved() {
        info!("cube is already solved");
        return Ok(Solution::default());
    }

    let mut history = HistoryCube::new(*cube);
    let mut stages = Vec::with_capacity(Stage::ALL.len());

    for stage in Stage::ALL {
        let start = history.trace().len();
        stage.run(&mut history)?;

        let moves = history.trace()[start..].to_vec();
        debug!("{stage}: {} moves: {}", moves.len(), serialize(&moves));
        stages.push(StageReport { stage, moves });
    }

    if !history.cube().is_solved() {
        // every stage finished but the cube is not solved: EPLL stopped short
        return Err(Stage::Epll.stalled());
    }

    let raw = history.into_trace();
    let moves = clean_moves(&raw);
    info!(
        "solved in {} moves ({} before cleaning): {}",
        moves.len(),
        raw.len(),
        stages
            .iter()
            .map(|report| format!("{} {}", report.stage, report.moves.len()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(Solution { raw, stages, moves })
}

/// Returns a cleaned move sequence that solves `cube`.
pub fn generate_solution(cube: &Cube) -> Result<Vec<Move>> {
    solve(cube).map(|solution| solution.moves)
}

/// Turns the cube with `y` until green is in front.
fn orient(cube: &mut HistoryCube) -> Result<()> {
    let up = cube.cube().sticker(Face::U, 1, 1);
    if up != White {
        return Err(Error::Unsolvable(format!(
            "the solver needs white on U, found {up}"
        )));
    }
    for _ in 0..ALIGN_LIMIT {
        if cube.cube().sticker(Face::F, 1, 1) == Green {
            return Ok(());
        }
        cube.apply(&[Move::Y]);
    }
    Err(Stage::Cross.stalled())
}

fn solve_cross(cube: &mut HistoryCube) -> Result<()> {
    orient(cube)?;

    for color in CROSS_COLORS {
        let setup = find_edge(cube, &CROSS_EDGES, [color, Yellow])?
            .ok_or_else(|| Stage::Cross.stalled())?;
        cube.apply_str(setup)?;

        if cube.get_edge("UF")?.get(Face::U) == Some(Yellow) {
            cube.apply_str("F2")?;
        } else {
            cube.apply_str("R U' R' F")?;
        }
        cube.apply_str("D'")?;
    }

    cube.apply_str("D2")
}

fn solve_corners(cube: &mut HistoryCube) -> Result<()> {
    for (first, second) in CORNER_COLORS {
        let mut setup = None;
        for (label, moves) in FIRST_LAYER_CORNERS {
            if cube.get_corner(label)?.has_colors([first, second, Yellow]) {
                setup = Some(moves);
                break;
            }
        }
        let setup = setup.ok_or_else(|| Stage::FirstLayerCorners.stalled())?;
        cube.apply_str(setup)?;

        let insert = if cube.get_sticker("UFR")? == Yellow {
            "U R U2 R' U R U' R'"
        } else if cube.get_sticker("FUR")? == Yellow {
            "U R U' R'"
        } else {
            "R U R'"
        };
        cube.apply_str(insert)?;
        cube.apply_str("D'")?;
    }
    Ok(())
}

fn solve_middle_edges(cube: &mut HistoryCube) -> Result<()> {
    for (first, second) in MIDDLE_COLORS {
        let setup = find_edge(cube, &MIDDLE_EDGES, [first, second])?
            .ok_or_else(|| Stage::MiddleEdges.stalled())?;
        cube.apply_str(setup)?;

        let insert = if cube.get_sticker("FU")? == first {
            "U R U' R' F R' F' R"
        } else {
            "U2 R' F R F' R U R'"
        };
        cube.apply_str(insert)?;
        cube.apply(&[Move::Y]);
    }
    Ok(())
}

/// Setup moves for the first listed edge carrying both `colors`.
fn find_edge(
    cube: &mut HistoryCube,
    table: &[(&'static str, &'static str)],
    colors: [Color; 2],
) -> Result<Option<&'static str>> {
    for &(label, setup) in table {
        if cube.get_edge(label)?.has_colors(colors) {
            return Ok(Some(setup));
        }
    }
    Ok(None)
}

/// Whether each listed top-layer sticker shows white.
fn white_pattern<const N: usize>(cube: &mut HistoryCube, labels: [&str; N]) -> Result<[bool; N]> {
    let mut pattern = [false; N];
    for (bit, label) in pattern.iter_mut().zip(labels) {
        *bit = cube.get_sticker(label)? == White;
    }
    Ok(pattern)
}

fn solve_eoll(cube: &mut HistoryCube) -> Result<()> {
    for _ in 0..ALIGN_LIMIT {
        let algorithm = match white_pattern(cube, ["UB", "UR", "UF", "UL"])? {
            [false, false, false, false] => EOLL_DOT,
            [false, false, true, true] => EOLL_ANGLE,
            [false, true, false, true] => EOLL_LINE,
            _ => {
                cube.apply_str("U")?;
                continue;
            }
        };
        return cube.apply_str(algorithm);
    }

    // a full revolution with no match is only right if the edges were oriented
    if white_pattern(cube, ["UB", "UR", "UF", "UL"])? == [true; 4] {
        Ok(())
    } else {
        Err(Stage::Eoll.stalled())
    }
}

fn solve_ocll(cube: &mut HistoryCube) -> Result<()> {
    const CORNERS: [&str; 4] = ["UBL", "UBR", "UFR", "UFL"];

    for _ in 0..ALIGN_LIMIT {
        let algorithm = match white_pattern(cube, CORNERS)? {
            [false, false, false, false] => {
                align(cube, Stage::Ocll, |cube| {
                    Ok(cube.get_sticker("FUR")? == White && cube.get_sticker("FUL")? == White)
                })?;
                let front = cube.get_corner("UFR")?.get(Face::F);
                let back = cube.get_corner("UBL")?.get(Face::B);
                if front == back {
                    OCLL_H
                } else {
                    OCLL_PI
                }
            }
            [false, false, false, true] => {
                if cube.get_sticker("FUR")? == White {
                    OCLL_SUNE
                } else {
                    OCLL_ANTISUNE
                }
            }
            [false, false, true, true] => {
                if cube.get_sticker("BRU")? == White {
                    OCLL_HEADLIGHTS
                } else {
                    OCLL_SIDEBARS
                }
            }
            [false, true, false, true] => {
                if cube.get_sticker("RUF")? != White {
                    cube.apply_str("U2")?;
                }
                OCLL_FISH
            }
            _ => {
                cube.apply_str("U")?;
                continue;
            }
        };
        return cube.apply_str(algorithm);
    }

    if white_pattern(cube, CORNERS)? == [true; 4] {
        Ok(())
    } else {
        Err(Stage::Ocll.stalled())
    }
}

fn solve_cpll(cube: &mut HistoryCube) -> Result<()> {
    for _ in 0..ALIGN_LIMIT {
        let front_matched = cube.get_sticker("FUR")? == cube.get_sticker("FUL")?;
        let back_matched = cube.get_sticker("BLU")? == cube.get_sticker("BRU")?;
        if front_matched && back_matched {
            return Ok(());
        }
        if cube.get_sticker("FRU")? == cube.get_sticker("FLU")? {
            return cube.apply_str(CPLL_SWAP);
        }
        cube.apply_str("U")?;
    }

    // diagonal swap: no pair of headlights anywhere
    cube.apply_str(CPLL_SWAP)?;
    cube.apply_str("U")?;
    cube.apply_str(CPLL_SWAP)
}

fn solve_epll(cube: &mut HistoryCube) -> Result<()> {
    let mut solved_edges = 0;
    for _ in 0..4 {
        if front_edge_matches(cube)? {
            solved_edges += 1;
        }
        cube.apply_str("U")?;
    }

    if solved_edges != 4 {
        if solved_edges == 0 {
            cube.apply_str(EPLL_CYCLE)?;
        }

        align(cube, Stage::Epll, front_edge_matches)?;
        cube.apply_str("U2")?;

        let mut repeats = 0;
        while !front_edge_matches(cube)? {
            if repeats == EPLL_REPEAT_LIMIT {
                return Err(Stage::Epll.stalled());
            }
            cube.apply_str(EPLL_CYCLE)?;
            repeats += 1;
        }
    }

    align(cube, Stage::Epll, |cube| {
        Ok(cube.get_sticker("FU")? == cube.get_sticker("FR")?)
    })
}

/// True when the front edge of the top layer matches the front corner.
fn front_edge_matches(cube: &mut HistoryCube) -> Result<bool> {
    Ok(cube.get_sticker("FU")? == cube.get_sticker("FUR")?)
}

/// Turns `U` until `done` holds, at most a full revolution.
fn align<F>(cube: &mut HistoryCube, stage: Stage, mut done: F) -> Result<()>
where
    F: FnMut(&mut HistoryCube) -> Result<bool>,
{
    for _ in 0..ALIGN_LIMIT {
        if done(cube)? {
            return Ok(());
        }
        cube.apply_str("U")?;
    }
    if done(cube)? {
        Ok(())
    } else {
        Err(stage.stalled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::notation::parse;
    use crate::scramble::scramble;

    fn scrambled(text: &str) -> Cube {
        let mut cube = Cube::new();
        cube.apply_str(text).unwrap();
        cube
    }

    fn assert_solves(cube: &Cube) -> Solution {
        let solution = solve(cube).unwrap();
        let mut replay = *cube;
        replay.apply(&solution.moves);
        assert!(replay.is_solved(), "solution {} failed", serialize(&solution.moves));
        solution
    }

    #[test]
    fn test_solved_cube_needs_no_moves() {
        let solution = solve(&Cube::new()).unwrap();
        assert!(solution.moves.is_empty());
        assert!(solution.stages.is_empty());
    }

    #[test]
    fn test_single_turns_are_solved() {
        for text in ["R", "U'", "F2", "L", "B'", "D"] {
            assert_solves(&scrambled(text));
        }
    }

    #[test]
    fn test_fixed_scramble_is_solved() {
        let cube = scrambled("D2 R' U F2 L B' D R2 F U' B2 L' D' F R U2 B L2 D' F'");
        let solution = assert_solves(&cube);

        assert_eq!(solution.stages.len(), Stage::ALL.len());
        let stage_total: usize = solution.stages.iter().map(|r| r.moves.len()).sum();
        assert_eq!(stage_total, solution.raw.len());
        assert!(solution.moves.len() <= solution.raw.len());
    }

    #[test]
    fn test_input_cube_is_not_mutated() {
        let cube = scrambled("R U R' U' F2 D L'");
        let before = cube;
        generate_solution(&cube).unwrap();
        assert_eq!(cube, before);
    }

    #[test]
    fn test_rotated_cube_is_solved() {
        let cube = scrambled("y R U2 F' L y2 D B");
        let moves = generate_solution(&cube).unwrap();
        let mut replay = cube;
        replay.apply(&moves);
        assert!(replay.is_solved());
    }

    #[test]
    fn test_white_must_be_up() {
        // yellow on U, white on D: a legal state the solver does not handle
        let text = "YYYYYYYYYGGGGGGGGGRRRRRRRRRBBBBBBBBBOOOOOOOOOWWWWWWWWW";
        let mut cube = Cube::from_facelets(text).unwrap();
        cube.apply_str("R").unwrap();
        assert!(matches!(solve(&cube), Err(Error::Unsolvable(_))));
    }

    #[test]
    fn test_stage_reports_cover_raw_trace() {
        let cube = scrambled("F R U' L2");
        let solution = solve(&cube).unwrap();
        assert_eq!(solution.stages[0].stage, Stage::Cross);
        assert_eq!(solution.stages[6].stage, Stage::Epll);
        assert_eq!(
            solution.raw,
            solution
                .stages
                .iter()
                .flat_map(|r| r.moves.iter().copied())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_seeded_scrambles_are_solved() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let moves = scramble(&mut rng, 40);
            let mut cube = Cube::new();
            cube.apply(&moves);
            assert_solves(&cube);
        }
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::FirstLayerCorners.to_string(), "first-layer corners");
        assert_eq!(
            Error::StageStalled { stage: Stage::Epll }.to_string(),
            "Solver stage EPLL did not converge"
        );
    }

    #[test]
    fn test_algorithms_parse() {
        for algorithm in [
            EOLL_DOT,
            EOLL_ANGLE,
            EOLL_LINE,
            OCLL_SUNE,
            OCLL_ANTISUNE,
            OCLL_H,
            OCLL_HEADLIGHTS,
            OCLL_SIDEBARS,
            OCLL_FISH,
            OCLL_PI,
            CPLL_SWAP,
            EPLL_CYCLE,
        ] {
            assert!(parse(algorithm).is_ok(), "{algorithm}");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_solution_solves_scramble(seed in any::<u64>(), length in 1..60usize) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut cube = Cube::new();
            cube.apply(&scramble(&mut rng, length));

            let moves = generate_solution(&cube).unwrap();
            cube.apply(&moves);
            prop_assert!(cube.is_solved());
        }
    }
}
