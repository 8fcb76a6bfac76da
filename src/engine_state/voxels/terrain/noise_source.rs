//! # Noise Source
//!
//! Deterministic 2D fractal noise built on the `noise` crate's Perlin kernel.

use noise::{NoiseFn, Perlin};

/// Coherent 2D noise with a fixed seed.
///
/// The same seed yields the same values in every process; there is no hidden
/// randomness.
#[derive(Clone, Copy, Debug)]
pub struct NoiseSource {
    perlin: Perlin,
}

impl NoiseSource {
    pub fn new(seed: u32) -> Self {
        NoiseSource {
            perlin: Perlin::new(seed),
        }
    }

    /// Fractal Perlin noise in `[0, 1]`.
    ///
    /// Octave `i` samples the kernel at `frequency * 2^i` with amplitude
    /// `0.5^i`; the sum is divided by the total amplitude.
    ///
    /// # Panics
    /// Panics if `octaves` is zero.
    pub fn perlin2d(&self, x: f32, y: f32, frequency: f32, octaves: u32) -> f32 {
        assert!(octaves >= 1, "perlin2d needs at least one octave");

        let mut xa = x as f64 * frequency as f64;
        let mut ya = y as f64 * frequency as f64;
        let mut amplitude = 1.0;
        let mut total = 0.0;
        let mut norm = 0.0;

        for _ in 0..octaves {
            total += self.sample(xa, ya) * amplitude;
            norm += amplitude;
            amplitude *= 0.5;
            xa *= 2.0;
            ya *= 2.0;
        }

        (total / norm) as f32
    }

    /// The raw kernel remapped from `[-1, 1]` to `[0, 1]`.
    fn sample(&self, x: f64, y: f64) -> f64 {
        (self.perlin.get([x, y]) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        NoiseSource::new(0)
    }
}
