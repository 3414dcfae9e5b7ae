//! Named access to the fixtures.
//!
//! The fixture names are the contract with test suites and the CLI: a
//! `Fixture` can be parsed from its name, reports the shape it promises and
//! builds its value from a `FixtureContext`.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, Result};
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::{
    fixtures,
    raster::{Raster, Shape},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixture {
    SampleImage,
    GrayscaleImage,
    BinaryImage,
    NoisyImage,
    EmptyImage,
    RotatedImage,
    TestDataDir,
}

impl Fixture {
    pub const ALL: [Fixture; 7] = [
        Fixture::SampleImage,
        Fixture::GrayscaleImage,
        Fixture::BinaryImage,
        Fixture::NoisyImage,
        Fixture::EmptyImage,
        Fixture::RotatedImage,
        Fixture::TestDataDir,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Fixture::SampleImage => "sample_image",
            Fixture::GrayscaleImage => "grayscale_image",
            Fixture::BinaryImage => "binary_image",
            Fixture::NoisyImage => "noisy_image",
            Fixture::EmptyImage => "empty_image",
            Fixture::RotatedImage => "rotated_image",
            Fixture::TestDataDir => "test_data_dir",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Fixture::SampleImage => "3x3 ruled table with text in the first row",
            Fixture::GrayscaleImage => "single-channel ruled table",
            Fixture::BinaryImage => "white strokes on black, thresholded table",
            Fixture::NoisyImage => "2x2 framed table on paper noise",
            Fixture::EmptyImage => "blank white canvas",
            Fixture::RotatedImage => "2x2 table rotated by 2 degrees",
            Fixture::TestDataDir => "scratch directory path under the temp dir",
        }
    }

    /// The shape of the produced image, or `None` for path fixtures.
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Fixture::SampleImage => Some(fixtures::SAMPLE_SHAPE),
            Fixture::GrayscaleImage => Some(fixtures::GRAYSCALE_SHAPE),
            Fixture::BinaryImage => Some(fixtures::BINARY_SHAPE),
            Fixture::NoisyImage => Some(fixtures::NOISY_SHAPE),
            Fixture::EmptyImage => Some(fixtures::EMPTY_SHAPE),
            Fixture::RotatedImage => Some(fixtures::ROTATED_SHAPE),
            Fixture::TestDataDir => None,
        }
    }

    pub fn is_image(&self) -> bool {
        self.shape().is_some()
    }

    /// Whether repeated builds with the same context give identical output.
    pub fn is_deterministic(&self, ctx: &FixtureContext) -> bool {
        !matches!(self, Fixture::NoisyImage) || ctx.seed.is_some()
    }

    pub fn build(&self, ctx: &FixtureContext) -> FixtureOutput {
        debug!(fixture = self.name(), seed = ?ctx.seed, "Building fixture");
        match self {
            Fixture::SampleImage => FixtureOutput::Image(fixtures::sample_image()),
            Fixture::GrayscaleImage => FixtureOutput::Image(fixtures::grayscale_image()),
            Fixture::BinaryImage => FixtureOutput::Image(fixtures::binary_image()),
            Fixture::NoisyImage => FixtureOutput::Image(match ctx.seed {
                Some(seed) => fixtures::noisy_image_seeded(seed),
                None => fixtures::noisy_image(),
            }),
            Fixture::EmptyImage => FixtureOutput::Image(fixtures::empty_image()),
            Fixture::RotatedImage => FixtureOutput::Image(fixtures::rotated_image()),
            Fixture::TestDataDir => FixtureOutput::Path(fixtures::test_data_dir(&ctx.tmp_dir)),
        }
    }

    pub fn info(&self) -> FixtureInfo {
        FixtureInfo {
            name: self.name(),
            description: self.description(),
            shape: self.shape(),
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fixture {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Fixture::ALL
            .into_iter()
            .find(|fixture| fixture.name() == s)
            .ok_or_else(|| {
                anyhow!(
                    "Unknown fixture: {} (expected one of: {})",
                    s,
                    Fixture::ALL.iter().map(Fixture::name).join(", ")
                )
            })
    }
}

/// Serializable summary of a fixture.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub shape: Option<Shape>,
}

/// Ambient values fixtures may draw on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureContext {
    /// Base directory for path fixtures.
    pub tmp_dir: PathBuf,
    /// Seed for randomized fixtures; `None` uses the thread RNG.
    pub seed: Option<u64>,
}

impl FixtureContext {
    pub fn new<P: AsRef<Path>>(tmp_dir: P) -> Self {
        Self {
            tmp_dir: tmp_dir.as_ref().to_path_buf(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for FixtureContext {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureOutput {
    Image(Raster),
    Path(PathBuf),
}

impl FixtureOutput {
    pub fn as_image(&self) -> Option<&Raster> {
        match self {
            FixtureOutput::Image(raster) => Some(raster),
            FixtureOutput::Path(_) => None,
        }
    }

    pub fn into_image(self) -> Option<Raster> {
        match self {
            FixtureOutput::Image(raster) => Some(raster),
            FixtureOutput::Path(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            FixtureOutput::Path(path) => Some(path),
            FixtureOutput::Image(_) => None,
        }
    }
}
