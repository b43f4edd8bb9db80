//! Benchmarks for the cube engine and solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lbl_cube::cleaner::clean_moves;
use lbl_cube::notation::parse;
use lbl_cube::scramble::{scramble, SCRAMBLE_LENGTH};
use lbl_cube::solver::{generate_solution, solve};
use lbl_cube::{Cube, PieceLocator};

fn scrambled_cube() -> Cube {
    let mut cube = Cube::new();
    cube.apply(&scramble(&mut StdRng::seed_from_u64(42), SCRAMBLE_LENGTH));
    cube
}

/// Benchmark applying a 40-move scramble.
fn bench_apply(c: &mut Criterion) {
    let moves = scramble(&mut StdRng::seed_from_u64(42), SCRAMBLE_LENGTH);

    c.bench_function("apply_scramble", |b| {
        b.iter(|| {
            let mut cube = Cube::new();
            cube.apply(black_box(&moves));
            cube
        })
    });
}

/// Benchmark the conjugate-read-restore lookups the solver leans on.
fn bench_locate(c: &mut Criterion) {
    let mut cube = scrambled_cube();

    c.bench_function("get_corner_dbl", |b| {
        b.iter(|| cube.get_corner(black_box("DBL")))
    });
    c.bench_function("get_sticker_fur", |b| {
        b.iter(|| cube.get_sticker(black_box("FUR")))
    });
}

/// Benchmark a full solve including cleaning.
fn bench_solve(c: &mut Criterion) {
    let cube = scrambled_cube();

    c.bench_function("generate_solution", |b| {
        b.iter(|| generate_solution(black_box(&cube)))
    });
}

/// Benchmark the cleaner on a raw solver trace.
fn bench_clean(c: &mut Criterion) {
    let raw = solve(&scrambled_cube()).map(|s| s.raw).unwrap_or_default();
    let padded = parse("U U2 R R' F2 F2 y y'").unwrap_or_default();

    c.bench_function("clean_raw_trace", |b| {
        b.iter(|| clean_moves(black_box(&raw)))
    });
    c.bench_function("clean_cancelling_pairs", |b| {
        b.iter(|| clean_moves(black_box(&padded)))
    });
}

criterion_group!(benches, bench_apply, bench_locate, bench_solve, bench_clean);
criterion_main!(benches);
