//! Melody walk.
//!
//! The melody is a coin-flip walk over the scale: after a uniform first pick,
//! each step either repeats the previous pitch or resamples the whole scale.
//! Repeats form short runs; resamples form jumps. There is no transition
//! table and no range constraint beyond the scale itself.

use rand::Rng;

/// Number of pitches in a generated melody.
pub const MELODY_LENGTH: usize = 32;

/// Chance that a step resamples the scale instead of repeating.
pub const RESAMPLE_PROBABILITY: f64 = 0.5;

/// Walk the scale for [`MELODY_LENGTH`] steps.
///
/// Returns an empty melody for an empty scale; callers reject that case
/// before reaching here.
pub fn melody_walk<R: Rng + ?Sized>(scale: &[u8], rng: &mut R) -> Vec<u8> {
    if scale.is_empty() {
        return Vec::new();
    }

    let mut melody = Vec::with_capacity(MELODY_LENGTH);
    let mut current = pick(scale, rng);
    melody.push(current);

    for _ in 1..MELODY_LENGTH {
        if rng.gen_bool(RESAMPLE_PROBABILITY) {
            current = pick(scale, rng);
        }
        melody.push(current);
    }

    melody
}

#[inline]
fn pick<R: Rng + ?Sized>(scale: &[u8], rng: &mut R) -> u8 {
    scale[rng.gen_range(0..scale.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodwave_spec::seeded_rng;

    #[test]
    fn test_length() {
        let mut rng = seeded_rng(3);
        assert_eq!(melody_walk(&[60, 62, 64], &mut rng).len(), MELODY_LENGTH);
    }

    #[test]
    fn test_pitches_come_from_scale() {
        let scale = [48, 55, 61, 70];
        for seed in 0..50 {
            let mut rng = seeded_rng(seed);
            for pitch in melody_walk(&scale, &mut rng) {
                assert!(scale.contains(&pitch), "pitch {} not in scale", pitch);
            }
        }
    }

    #[test]
    fn test_single_pitch_scale_is_constant() {
        let mut rng = seeded_rng(9);
        assert!(melody_walk(&[67], &mut rng).iter().all(|&p| p == 67));
    }

    #[test]
    fn test_walk_produces_runs() {
        // With a wide scale, a repeat almost always comes from the coin flip,
        // so over many seeds roughly half the steps repeat.
        let scale: Vec<u8> = (40..100).collect();
        let mut repeats = 0;
        let mut steps = 0;
        for seed in 0..200 {
            let mut rng = seeded_rng(seed);
            let melody = melody_walk(&scale, &mut rng);
            for pair in melody.windows(2) {
                steps += 1;
                if pair[0] == pair[1] {
                    repeats += 1;
                }
            }
        }
        let ratio = repeats as f64 / steps as f64;
        assert!(ratio > 0.45 && ratio < 0.56, "repeat ratio {}", ratio);
    }

    #[test]
    fn test_same_seed_same_melody() {
        let scale = [60, 62, 64, 67, 69];
        let a = melody_walk(&scale, &mut seeded_rng(11));
        let b = melody_walk(&scale, &mut seeded_rng(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_scale_yields_empty_melody() {
        let mut rng = seeded_rng(0);
        assert!(melody_walk(&[], &mut rng).is_empty());
    }
}
