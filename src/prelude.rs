//! The types and functions most tests need, in one import.

pub use crate::catalog::{Fixture, FixtureContext, FixtureOutput};
pub use crate::draw::{draw_line, draw_rectangle, put_text, Color, TextStyle};
pub use crate::error::{FixtureError, Result};
pub use crate::fixtures::{
    binary_image, empty_image, grayscale_image, noisy_image, noisy_image_seeded, rotated_image,
    sample_image, test_data_dir,
};
pub use crate::geometry::{Point, Rect};
pub use crate::raster::{Channels, Raster, Shape};
pub use crate::table::TableGrid;
