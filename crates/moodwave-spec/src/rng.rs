//! Random sources for the generators.
//!
//! Generators never reach for an ambient RNG; the caller hands them one.
//! Production code uses [`entropy_rng`], tests and `--seed` runs use
//! [`seeded_rng`] so output can be reproduced exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Random source type used throughout Moodwave.
pub type GenRng = Pcg32;

/// Create a PCG32 source from a 64-bit seed.
pub fn seeded_rng(seed: u64) -> GenRng {
    Pcg32::seed_from_u64(seed)
}

/// Create a PCG32 source seeded from the operating system.
pub fn entropy_rng() -> GenRng {
    Pcg32::from_entropy()
}

/// Derive an independent seed for a named stream using BLAKE3.
///
/// ```text
/// stream_seed = truncate_u64(BLAKE3(base_seed || stream))
/// ```
///
/// ```
/// use moodwave_spec::rng::derive_stream_seed;
///
/// let music = derive_stream_seed(42, "music");
/// let cover = derive_stream_seed(42, "cover");
/// assert_ne!(music, cover);
/// ```
pub fn derive_stream_seed(base_seed: u64, stream: &str) -> u64 {
    let mut input = Vec::with_capacity(8 + stream.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(stream.as_bytes());

    let hash = blake3::hash(&input);

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Draw a normally distributed value with mean 0 (Box-Muller).
pub fn gen_gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> f64 {
    // gen::<f64>() is in [0, 1); shift away from 0 so ln() stays finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let radius = (-2.0 * u1.ln()).sqrt();
    radius * (std::f64::consts::TAU * u2).cos() * sigma
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_output_is_reproducible() {
        let mut rng1 = seeded_rng(42);
        let mut rng2 = seeded_rng(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen::<u32>(), rng2.gen::<u32>());
        }
    }

    #[test]
    fn test_derive_stream_seed_is_stable() {
        assert_eq!(
            derive_stream_seed(7, "music"),
            derive_stream_seed(7, "music")
        );
        assert_ne!(derive_stream_seed(7, "music"), derive_stream_seed(8, "music"));
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = seeded_rng(1);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| gen_gaussian(&mut rng, 15.0)).collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.5, "mean {} too far from 0", mean);
        assert!((var.sqrt() - 15.0).abs() < 0.5, "std dev {} not near 15", var.sqrt());
    }
}
