//! Bounded uniform noise.

use anyhow::Result;
use ndarray::Array3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::raster::{Channels, Raster};

/// A half-open intensity range `low..high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseRange {
    low: u8,
    high: u8,
}

impl NoiseRange {
    /// Off-white paper texture, 240 to 254 inclusive.
    pub const PAPER: NoiseRange = NoiseRange {
        low: 240,
        high: 255,
    };

    pub fn new(low: u8, high: u8) -> Result<Self> {
        anyhow::ensure!(low < high, "Empty noise range: {}..{}", low, high);
        Ok(Self { low, high })
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    /// Exclusive upper bound.
    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn contains(&self, value: u8) -> bool {
        (self.low..self.high).contains(&value)
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> u8 {
        rng.random_range(self.low..self.high)
    }
}

/// Creates a raster whose every value is drawn uniformly from `range`.
pub fn uniform_noise<R: Rng>(
    height: usize,
    width: usize,
    channels: Channels,
    range: NoiseRange,
    rng: &mut R,
) -> Raster {
    let data = Array3::from_shape_simple_fn((height, width, channels.count()), || {
        range.sample(rng)
    });
    Raster::from_parts(data)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_empty_range_rejected() {
        assert!(NoiseRange::new(10, 10).is_err());
        assert!(NoiseRange::new(11, 10).is_err());
        assert!(NoiseRange::new(10, 11).is_ok());
    }

    #[test]
    fn test_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = NoiseRange::new(100, 103).unwrap();
        let raster = uniform_noise(40, 50, Channels::Rgb, range, &mut rng);
        assert_eq!(raster.as_array().shape(), &[40, 50, 3]);
        assert!(raster.as_array().iter().all(|&v| range.contains(v)));
    }

    #[test]
    fn test_single_value_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let range = NoiseRange::new(254, 255).unwrap();
        let raster = uniform_noise(3, 3, Channels::Gray, range, &mut rng);
        assert!(raster.as_array().iter().all(|&v| v == 254));
    }
}
