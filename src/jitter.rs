//! Injectable randomness for per-glyph presentation jitter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<StdRng> {
    /// Reproducible source; identical seeds yield identical jitter.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

#[cfg(feature = "thread-rng")]
impl RngSource<rand::rngs::ThreadRng> {
    /// Fresh, unseeded jitter from the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Amplitude of the per-glyph jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Jitter {
    /// Offsets are drawn from `[-max_offset, max_offset]` layout units.
    pub max_offset: f32,
    /// Rotation is drawn from `[-max_rotation_deg, max_rotation_deg]` degrees.
    pub max_rotation_deg: f32,
}

impl Jitter {
    /// No jitter at all; placements sit exactly on the cursor.
    pub const NONE: Self = Self {
        max_offset: 0.0,
        max_rotation_deg: 0.0,
    };

    pub const fn new(max_offset: f32, max_rotation_deg: f32) -> Self {
        Self {
            max_offset,
            max_rotation_deg,
        }
    }

    pub fn sample_offset<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        symmetric(rng, self.max_offset)
    }

    pub fn sample_rotation<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        symmetric(rng, self.max_rotation_deg)
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new(1.0, 0.5)
    }
}

/// Map a unit sample onto `[-amplitude, amplitude]`.
fn symmetric<R: RandomSource + ?Sized>(rng: &mut R, amplitude: f32) -> f32 {
    let unit = rng.next_unit();
    let unit = if unit.is_finite() {
        unit.clamp(0.0, 1.0)
    } else {
        0.5
    };
    (unit - 0.5) * 2.0 * amplitude
}
