//! 3D step-through viewer for a solution using kiss3d.

use kiss3d::prelude::*;

use lbl_cube::color::Color as CubeColor;
use lbl_cube::notation::{serialize, Face, Move};
use lbl_cube::Cube;

/// Edge length of one sticker, leaving a visible gap to its neighbors.
const STICKER_SIZE: f32 = 0.9;
/// Thickness of a sticker along the face normal.
const STICKER_DEPTH: f32 = 0.05;
/// Distance from the cube center to a face plane.
const FACE_OFFSET: f32 = 1.5;

fn sticker_color(color: CubeColor) -> Color {
    match color {
        CubeColor::White => Color::new(0.95, 0.95, 0.95, 1.0),
        CubeColor::Yellow => Color::new(1.0, 0.85, 0.1, 1.0),
        CubeColor::Green => Color::new(0.1, 0.7, 0.25, 1.0),
        CubeColor::Blue => Color::new(0.1, 0.3, 0.9, 1.0),
        CubeColor::Red => Color::new(0.85, 0.1, 0.1, 1.0),
        CubeColor::Orange => Color::new(1.0, 0.5, 0.05, 1.0),
    }
}

/// World position of a sticker center.
///
/// X points to R, Y to U and Z to F. Each face grid is laid out the way the
/// cube stores it, e.g. row 0 of U borders B and column 0 of R borders F.
fn sticker_position(face: Face, row: usize, col: usize) -> Vec3 {
    let r = row as f32 - 1.0;
    let c = col as f32 - 1.0;
    match face {
        Face::U => Vec3::new(c, FACE_OFFSET, r),
        Face::D => Vec3::new(c, -FACE_OFFSET, -r),
        Face::F => Vec3::new(c, -r, FACE_OFFSET),
        Face::B => Vec3::new(-c, -r, -FACE_OFFSET),
        Face::R => Vec3::new(FACE_OFFSET, -r, -c),
        Face::L => Vec3::new(-FACE_OFFSET, -r, c),
    }
}

/// Box dimensions of a sticker: thin along the face normal.
fn sticker_extent(face: Face) -> (f32, f32, f32) {
    match face {
        Face::U | Face::D => (STICKER_SIZE, STICKER_DEPTH, STICKER_SIZE),
        Face::F | Face::B => (STICKER_SIZE, STICKER_SIZE, STICKER_DEPTH),
        Face::R | Face::L => (STICKER_DEPTH, STICKER_SIZE, STICKER_SIZE),
    }
}

/// Adds one node per sticker for `cube`.
fn build_scene(scene: &mut SceneNode3d, cube: &Cube) -> Vec<SceneNode3d> {
    let mut nodes = Vec::with_capacity(lbl_cube::cube::STICKERS);
    for face in Face::ALL {
        let (w, h, d) = sticker_extent(face);
        for (row, cells) in cube.face(face).iter().enumerate() {
            for (col, &color) in cells.iter().enumerate() {
                let node = scene
                    .add_cube(w, h, d)
                    .set_color(sticker_color(color))
                    .set_position(sticker_position(face, row, col));
                nodes.push(node);
            }
        }
    }
    nodes
}

/// Every intermediate state: the start, then one per applied move.
fn states(start: &Cube, moves: &[Move]) -> Vec<Cube> {
    let mut cube = *start;
    let mut states = Vec::with_capacity(moves.len() + 1);
    states.push(cube);
    for &mv in moves {
        cube.apply_move(mv);
        states.push(cube);
    }
    states
}

fn title(step: usize, moves: &[Move]) -> String {
    let next = moves
        .get(step)
        .map_or_else(|| "end".to_string(), |mv| format!("next {mv}"));
    format!(
        "Move {}/{} ({next}) - [Left/Right] step, [R] reset",
        step,
        moves.len()
    )
}

/// Opens a window stepping through `moves` applied to `start`.
pub fn display(start: Cube, moves: Vec<Move>) {
    pollster::block_on(display_async(start, moves));
}

async fn display_async(start: Cube, moves: Vec<Move>) {
    log::info!("displaying {} moves: {}", moves.len(), serialize(&moves));

    let states = states(&start, &moves);
    let mut step = 0;

    let mut window = Window::new(&title(step, &moves)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(10.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    // dark core so gaps between stickers read as plastic
    scene
        .add_cube(2.9, 2.9, 2.9)
        .set_color(Color::new(0.08, 0.08, 0.08, 1.0))
        .set_position(Vec3::ZERO);

    let mut stickers = build_scene(&mut scene, &states[step]);
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Right if step + 1 < states.len() => {
                            step += 1;
                            needs_rebuild = true;
                        }
                        Key::Left if step > 0 => {
                            step -= 1;
                            needs_rebuild = true;
                        }
                        Key::R => {
                            step = 0;
                            needs_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if needs_rebuild {
            for mut node in stickers.drain(..) {
                node.remove();
            }
            stickers = build_scene(&mut scene, &states[step]);
            window.set_title(&title(step, &moves));
            needs_rebuild = false;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
