//! Random scrambles.

use rand::Rng;

use crate::notation::{Face, Move};

/// Default scramble length.
pub const SCRAMBLE_LENGTH: usize = 40;

/// Faces in draw order.
const FACES: [Face; 6] = [Face::U, Face::R, Face::L, Face::B, Face::D, Face::F];

/// Draws `length` random face turns.
///
/// Each face is equally likely. A turn is plain one time in four, double one
/// time in four and prime otherwise. Consecutive moves may share a face.
pub fn scramble<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Move> {
    (0..length)
        .map(|_| {
            let modifier = rng.gen_range(0..4);
            let face = FACES[rng.gen_range(0..FACES.len())];
            match modifier {
                0 => Move::cw(face),
                1 => Move::half(face),
                _ => Move::ccw(face),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::notation::Layer;

    #[test]
    fn test_length_and_face_moves_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let moves = scramble(&mut rng, SCRAMBLE_LENGTH);
        assert_eq!(moves.len(), SCRAMBLE_LENGTH);
        assert!(moves.iter().all(|mv| matches!(mv.layer, Layer::Face(_))));
        assert!(scramble(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_same_seed_same_scramble() {
        let first = scramble(&mut StdRng::seed_from_u64(99), 25);
        let second = scramble(&mut StdRng::seed_from_u64(99), 25);
        assert_eq!(first, second);
    }

    #[test]
    fn test_modifier_mix() {
        let mut rng = StdRng::seed_from_u64(7);
        let moves = scramble(&mut rng, 4000);
        let doubles = moves.iter().filter(|mv| mv.double).count();
        let primes = moves.iter().filter(|mv| mv.invert).count();
        // expected 1000 doubles and 2000 primes
        assert!((800..1200).contains(&doubles), "{doubles} doubles");
        assert!((1800..2200).contains(&primes), "{primes} primes");
    }
}
