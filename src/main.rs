//! Layer-by-layer cube solver
//!
//! Scrambles, inspects and solves a 3x3 Rubik's cube from the command line,
//! and can step through a solution in an interactive 3D viewer.

mod visualization;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lbl_cube::notation::{self, serialize};
use lbl_cube::scramble::{scramble, SCRAMBLE_LENGTH};
use lbl_cube::{cleaner, read_state, solver, Cube, Result};

/// Scrambles and solves a 3x3 Rubik's cube with the layer-by-layer method.
#[derive(Parser)]
#[command(name = "lbl-cube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print a random scramble.
    Scramble {
        /// Number of moves.
        #[arg(long, default_value_t = SCRAMBLE_LENGTH)]
        length: usize,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Solve a scrambled cube and print the solution.
    Solve {
        /// Moves applied to a solved cube.
        scramble: Option<String>,
        /// 54 facelet letters (faces U F L B R D, row-major) instead of a scramble.
        #[arg(long, conflicts_with = "scramble")]
        state: Option<String>,
        /// Also print the per-stage moves before cleaning.
        #[arg(long)]
        raw: bool,
    },
    /// Print the cube after a scramble.
    State {
        scramble: Option<String>,
        /// Print JSON instead of the unfolded net.
        #[arg(long)]
        json: bool,
    },
    /// Collapse adjacent same-layer moves in a sequence.
    Clean { moves: String },
    /// Solve a scramble and step through the solution in a 3D viewer.
    Display { scramble: Option<String> },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<Command>) -> Result<()> {
    match command {
        Some(Command::Scramble { length, seed }) => {
            println!("{}", serialize(&random_scramble(length, seed)));
            Ok(())
        }
        Some(Command::Solve {
            scramble,
            state,
            raw,
        }) => {
            let cube = match state {
                Some(facelets) => Cube::from_facelets(&facelets)?,
                None => scrambled(scramble.as_deref())?,
            };
            print!("{}", solve_report(&cube, raw)?);
            Ok(())
        }
        Some(Command::State { scramble, json }) => {
            let cube = scrambled(scramble.as_deref())?;
            if json {
                match serde_json::to_string_pretty(&read_state(&cube)) {
                    Ok(text) => println!("{text}"),
                    Err(e) => eprintln!("Failed to encode state: {e}"),
                }
            } else {
                print!("{cube}");
                println!("solved: {}", cube.is_solved());
            }
            Ok(())
        }
        Some(Command::Clean { moves }) => {
            println!("{}", cleaner::clean(&moves)?);
            Ok(())
        }
        Some(Command::Display { scramble }) => {
            let cube = match scramble {
                Some(text) => scrambled(Some(&text))?,
                None => random_cube(),
            };
            let moves = solver::generate_solution(&cube)?;
            println!("Solution ({} moves): {}", moves.len(), serialize(&moves));
            println!("Controls: Left/Right step, R reset");
            visualization::display(cube, moves);
            Ok(())
        }
        None => {
            // default: scramble, solve and print
            let moves = random_scramble(SCRAMBLE_LENGTH, None);
            println!("Scramble: {}", serialize(&moves));
            let mut cube = Cube::new();
            cube.apply(&moves);
            print!("{}", solve_report(&cube, false)?);
            Ok(())
        }
    }
}

fn random_scramble(length: usize, seed: Option<u64>) -> Vec<notation::Move> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    scramble(&mut rng, length)
}

fn random_cube() -> Cube {
    let mut cube = Cube::new();
    cube.apply(&random_scramble(SCRAMBLE_LENGTH, None));
    cube
}

/// A solved cube with `text` applied, if given.
fn scrambled(text: Option<&str>) -> Result<Cube> {
    let mut cube = Cube::new();
    if let Some(text) = text {
        cube.apply_str(text)?;
    }
    Ok(cube)
}

/// Formats the solution of `cube`, optionally with the raw per-stage moves.
fn solve_report(cube: &Cube, raw: bool) -> Result<String> {
    let solution = solver::solve(cube)?;

    let mut report = String::new();
    if raw {
        for stage in &solution.stages {
            let label = format!("{:<20}", stage.stage.to_string());
            report.push_str(&moves_line(&label, &stage.moves));
        }
        report.push_str(&moves_line("Raw", &solution.raw));
    }
    report.push_str(&moves_line("Solution", &solution.moves));
    Ok(report)
}

/// `label (n moves): moves`, without trailing space when there are none.
fn moves_line(label: &str, moves: &[notation::Move]) -> String {
    let mut line = format!("{label} ({} moves):", moves.len());
    if !moves.is_empty() {
        line.push(' ');
        line.push_str(&serialize(moves));
    }
    line.push('\n');
    line
}
