//! Piece slots and their canonicalization tables.
//!
//! Every edge slot has a fixed setup sequence that carries whatever piece sits
//! there into UF, and every corner slot one that carries it into UFR. Each
//! slot also records the order in which its stickers land on the canonical
//! cells, so a slot's faces read in that order are the colors at
//! (U, F) for edges and (U, F, R) for corners after setup.
//!
//! Labels may name a slot's faces in any order. All spellings are expanded
//! once into a lookup map rather than permuted at query time.

use std::sync::LazyLock;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::notation::{Face, Move};

use Face::{B, D, F, L, R, U};

// setup moves, suffixed with their clockwise quarter-turn count
const U1: Move = Move::cw(U);
const U2: Move = Move::half(U);
const U3: Move = Move::ccw(U);
const F1: Move = Move::cw(F);
const F2: Move = Move::half(F);
const F3: Move = Move::ccw(F);
const R1: Move = Move::cw(R);
const R2: Move = Move::half(R);
const L2: Move = Move::half(L);
const L3: Move = Move::ccw(L);
const D2: Move = Move::half(D);

/// One of the twelve edge slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSlot {
    UF,
    UL,
    UR,
    UB,
    LB,
    LD,
    LF,
    RB,
    RD,
    RF,
    DB,
    DF,
}

impl EdgeSlot {
    pub const ALL: [EdgeSlot; 12] = [
        EdgeSlot::UF,
        EdgeSlot::UL,
        EdgeSlot::UR,
        EdgeSlot::UB,
        EdgeSlot::LB,
        EdgeSlot::LD,
        EdgeSlot::LF,
        EdgeSlot::RB,
        EdgeSlot::RD,
        EdgeSlot::RF,
        EdgeSlot::DB,
        EdgeSlot::DF,
    ];

    /// Slot faces in the order their stickers land on U and F after setup.
    pub const fn faces(self) -> [Face; 2] {
        match self {
            EdgeSlot::UF => [U, F],
            EdgeSlot::UL => [U, L],
            EdgeSlot::UR => [U, R],
            EdgeSlot::UB => [U, B],
            EdgeSlot::LB => [L, B],
            EdgeSlot::LD => [L, D],
            EdgeSlot::LF => [L, F],
            EdgeSlot::RB => [R, B],
            EdgeSlot::RD => [R, D],
            EdgeSlot::RF => [R, F],
            EdgeSlot::DB => [D, B],
            EdgeSlot::DF => [D, F],
        }
    }

    /// Moves that bring this slot's piece to UF.
    pub const fn setup(self) -> &'static [Move] {
        match self {
            EdgeSlot::UF => &[],
            EdgeSlot::UL => &[U3],
            EdgeSlot::UR => &[U1],
            EdgeSlot::UB => &[U2],
            EdgeSlot::LB => &[L2, F1],
            EdgeSlot::LD => &[L3, F1],
            EdgeSlot::LF => &[F1],
            EdgeSlot::RB => &[R2, F3],
            EdgeSlot::RD => &[R1, F3],
            EdgeSlot::RF => &[F3],
            EdgeSlot::DB => &[D2, F2],
            EdgeSlot::DF => &[F2],
        }
    }
}

/// One of the eight corner slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerSlot {
    UFR,
    DFR,
    DBR,
    URB,
    ULF,
    UBL,
    DFL,
    DBL,
}

impl CornerSlot {
    pub const ALL: [CornerSlot; 8] = [
        CornerSlot::UFR,
        CornerSlot::DFR,
        CornerSlot::DBR,
        CornerSlot::URB,
        CornerSlot::ULF,
        CornerSlot::UBL,
        CornerSlot::DFL,
        CornerSlot::DBL,
    ];

    /// Slot faces in the order their stickers land on U, F and R after setup.
    ///
    /// Down corners do not read in U/D-first order: the setup twists them.
    pub const fn faces(self) -> [Face; 3] {
        match self {
            CornerSlot::UFR => [U, F, R],
            CornerSlot::DFR => [F, D, R],
            CornerSlot::DBR => [D, B, R],
            CornerSlot::URB => [U, R, B],
            CornerSlot::ULF => [U, L, F],
            CornerSlot::UBL => [U, B, L],
            CornerSlot::DFL => [F, L, D],
            CornerSlot::DBL => [D, L, B],
        }
    }

    /// Moves that bring this slot's piece to UFR.
    pub const fn setup(self) -> &'static [Move] {
        match self {
            CornerSlot::UFR => &[],
            CornerSlot::DFR => &[R1],
            CornerSlot::DBR => &[R2],
            CornerSlot::URB => &[U1],
            CornerSlot::ULF => &[U3],
            CornerSlot::UBL => &[U2],
            CornerSlot::DFL => &[L3, U3],
            CornerSlot::DBL => &[L2, U3],
        }
    }
}

/// A resolved piece slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Edge(EdgeSlot),
    Corner(CornerSlot),
}

/// Every spelling of every slot label, e.g. "UFR", "FUR" and "RFU" all map to
/// the UFR corner.
static SPELLINGS: LazyLock<FxHashMap<String, Slot>> = LazyLock::new(|| {
    let mut spellings = FxHashMap::default();

    for edge in EdgeSlot::ALL {
        for spelling in edge.faces().iter().permutations(2) {
            spellings.insert(
                spelling.into_iter().map(|f| f.letter()).collect(),
                Slot::Edge(edge),
            );
        }
    }
    for corner in CornerSlot::ALL {
        for spelling in corner.faces().iter().permutations(3) {
            spellings.insert(
                spelling.into_iter().map(|f| f.letter()).collect(),
                Slot::Corner(corner),
            );
        }
    }

    spellings
});

/// Looks up the slot named by a label in any letter order.
pub fn resolve(label: &str) -> Option<Slot> {
    SPELLINGS.get(label).copied()
}
