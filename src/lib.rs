//! # Tablefix
//!
//! Tablefix builds small synthetic raster images for exercising table and
//! document detection code: ruled tables, text, paper noise and skew. Each
//! fixture is a plain function returning a fresh buffer of a fixed shape.
//!
//! ## Features
//!
//! - **Fixtures**: `sample_image`, `grayscale_image`, `binary_image`,
//!   `noisy_image`, `empty_image`, `rotated_image` and `test_data_dir`.
//! - **Drawing**: thick lines, rectangles, region fills and bitmap text.
//! - **Warping**: affine rotation with bilinear resampling.
//! - **Export**: PNG output with a CSV manifest of shapes and digests.
//!
//! ## Modules
//!
//! - `fixtures`: The fixture functions themselves.
//! - `catalog`: Lookup of fixtures by name, with their declared shapes.
//! - `raster`: The `ndarray`-backed image buffer.
//! - `draw`, `font`, `noise`, `warp`, `table`: Building blocks for fixtures.
//! - `render`: Writing fixtures to disk.
//! - `config`: Render settings loaded from JSON.
//! - `error`: The error type for the library.
//! - `prelude`: A collection of the most commonly used items.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod prelude;
pub mod raster;
pub mod render;

pub mod draw;
pub mod font;
pub mod geometry;
pub mod noise;
pub mod table;
pub mod warp;
