//! Random sampling helpers for ray tracing.
//!
//! All helpers draw from an explicitly passed random-number generator so
//! that every worker owns its own stream and renders stay reproducible
//! under a fixed seed.

use glam::Vec3A;
use rand::Rng;

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32(rng: &mut impl Rng) -> f32 {
    rng.random()
}

/// Generate a random unit vector uniformly distributed on the unit sphere.
///
/// Rejection-sampled: draw a point in the [-1, 1] cube, keep it if it lands
/// inside the unit ball (and away from the origin, where normalization
/// would blow up), then project onto the sphere.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let length_squared = p.length_squared();
        if length_squared > 1e-12 && length_squared <= 1.0 {
            return p / length_squared.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_random_f32_in_unit_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..1000 {
            let x = random_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_random_unit_vector_has_unit_length() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_random_unit_vector_covers_both_hemispheres() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut up = 0;
        let n = 1000;
        for _ in 0..n {
            if random_unit_vector(&mut rng).y > 0.0 {
                up += 1;
            }
        }
        // A uniform sphere distribution should not be lopsided.
        assert!(up > n / 4 && up < 3 * n / 4);
    }
}
