//! The synthetic image fixtures.
//!
//! Every function returns a freshly built buffer with a fixed shape. All of
//! them are deterministic except [`noisy_image`], which draws its background
//! from the thread RNG; use [`noisy_image_seeded`] when a test needs a
//! reproducible buffer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::warn;

use crate::{
    draw::{draw_line, draw_rectangle, put_text, Color, TextStyle},
    geometry::Point,
    noise::{uniform_noise, NoiseRange},
    raster::{Channels, Raster, Shape},
    table::TableGrid,
    warp::{rotate, Border},
};

pub const SAMPLE_SHAPE: Shape = Shape::new(300, 400, Channels::Rgb);
pub const GRAYSCALE_SHAPE: Shape = Shape::new(200, 300, Channels::Gray);
pub const BINARY_SHAPE: Shape = Shape::new(100, 150, Channels::Gray);
pub const NOISY_SHAPE: Shape = Shape::new(150, 200, Channels::Rgb);
pub const EMPTY_SHAPE: Shape = Shape::new(100, 100, Channels::Rgb);
pub const ROTATED_SHAPE: Shape = Shape::new(200, 300, Channels::Rgb);

/// Skew applied by [`rotated_image`], in degrees.
pub const ROTATION_ANGLE: f64 = 2.0;
pub const ROTATION_CENTER: (f64, f64) = (150.0, 100.0);

const LINE_THICKNESS: u32 = 2;

fn canvas(shape: Shape, value: u8) -> Raster {
    Raster::filled(shape.height, shape.width, shape.channels, value)
}

/// The ruled grid drawn by [`sample_image`]: 3 x 3 cells of 100 x 50 pixels.
pub fn sample_table() -> TableGrid {
    TableGrid::from_valid(vec![50, 150, 250, 350], vec![50, 100, 150, 200])
        .with_thickness(LINE_THICKNESS)
}

/// The ruled grid drawn by [`noisy_image`]: 2 x 2 cells.
pub fn noisy_table() -> TableGrid {
    TableGrid::from_valid(vec![25, 100, 175], vec![25, 75, 125])
        .with_thickness(LINE_THICKNESS)
}

/// The ruled grid drawn by [`rotated_image`] before rotation: 2 x 2 cells.
pub fn rotated_table() -> TableGrid {
    TableGrid::from_valid(vec![50, 150, 250], vec![50, 100, 150])
        .with_thickness(LINE_THICKNESS)
}

/// A simple table with a header row of text, on a white RGB canvas.
pub fn sample_image() -> Raster {
    let mut img = canvas(SAMPLE_SHAPE, 255);
    sample_table().draw(&mut img);

    let style = TextStyle {
        scale: 2,
        color: Color::BLACK,
    };
    put_text(&mut img, "Cell 1", Point::new(60, 80), &style);
    put_text(&mut img, "Cell 2", Point::new(160, 80), &style);
    put_text(&mut img, "Cell 3", Point::new(260, 80), &style);

    img
}

/// A single-channel table with two-pixel rules written directly into the buffer.
pub fn grayscale_image() -> Raster {
    let mut img = canvas(GRAYSCALE_SHAPE, 255);

    for row in [50, 100, 150] {
        img.fill_region(row..row + 2, 20..280, Color::BLACK);
    }
    for col in [50, 150, 250] {
        img.fill_region(50..150, col..col + 2, Color::BLACK);
    }

    img
}

/// White five-pixel strokes on black, as produced by a thresholding step.
pub fn binary_image() -> Raster {
    let mut img = canvas(BINARY_SHAPE, 0);

    img.fill_region(25..30, 25..125, Color::WHITE);
    img.fill_region(70..75, 25..125, Color::WHITE);
    img.fill_region(25..75, 25..30, Color::WHITE);
    img.fill_region(25..75, 75..80, Color::WHITE);
    img.fill_region(25..75, 120..125, Color::WHITE);

    img
}

/// A framed 2 x 2 table on paper-like noise, using the thread RNG.
pub fn noisy_image() -> Raster {
    noisy_image_with(&mut rand::rng())
}

/// [`noisy_image`] with a reproducible background.
pub fn noisy_image_seeded(seed: u64) -> Raster {
    noisy_image_with(&mut StdRng::seed_from_u64(seed))
}

pub fn noisy_image_with<R: Rng>(rng: &mut R) -> Raster {
    let shape = NOISY_SHAPE;
    let mut img = uniform_noise(shape.height, shape.width, shape.channels, NoiseRange::PAPER, rng);

    draw_rectangle(
        &mut img,
        Point::new(25, 25),
        Point::new(175, 125),
        Color::BLACK,
        LINE_THICKNESS,
    );
    draw_line(&mut img, Point::new(25, 75), Point::new(175, 75), Color::BLACK, LINE_THICKNESS);
    draw_line(&mut img, Point::new(100, 25), Point::new(100, 125), Color::BLACK, LINE_THICKNESS);

    img
}

/// A blank white canvas with nothing to detect.
pub fn empty_image() -> Raster {
    canvas(EMPTY_SHAPE, 255)
}

/// A 2 x 2 table skewed by [`ROTATION_ANGLE`] degrees about the canvas center.
///
/// Areas rotated in from outside the canvas are black. Should the warp ever
/// fail, the unrotated table is returned and a warning is logged.
pub fn rotated_image() -> Raster {
    rotated_image_by(ROTATION_ANGLE).unwrap_or_else(|err| {
        warn!(
            angle = ROTATION_ANGLE,
            error = %err,
            "Rotation failed, returning the unrotated table"
        );
        unrotated_table_image()
    })
}

/// The table of [`rotated_image`] rotated by an arbitrary angle.
///
/// The output always has the shape of [`ROTATED_SHAPE`]. Fails for angles
/// that are not finite.
pub fn rotated_image_by(angle: f64) -> Result<Raster> {
    anyhow::ensure!(angle.is_finite(), "Rotation angle must be finite, got {}", angle);
    let shape = ROTATED_SHAPE;
    rotate(
        &unrotated_table_image(),
        ROTATION_CENTER,
        angle,
        shape.width,
        shape.height,
        Border::default(),
    )
    .with_context(|| format!("Failed to rotate the table by {} degrees", angle))
}

fn unrotated_table_image() -> Raster {
    let mut img = canvas(ROTATED_SHAPE, 255);

    draw_rectangle(
        &mut img,
        Point::new(50, 50),
        Point::new(250, 150),
        Color::BLACK,
        LINE_THICKNESS,
    );
    draw_line(&mut img, Point::new(50, 100), Point::new(250, 100), Color::BLACK, LINE_THICKNESS);
    draw_line(&mut img, Point::new(150, 50), Point::new(150, 150), Color::BLACK, LINE_THICKNESS);
    img
}

/// Location for a test's scratch data under `tmp`. The directory is not created.
pub fn test_data_dir<P: AsRef<Path>>(tmp: P) -> PathBuf {
    tmp.as_ref().join("test_data")
}
