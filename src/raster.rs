//! This module provides the `Raster` buffer every fixture returns.
//!
//! A raster is a `height x width x channels` array of `u8` intensities stored
//! in `(row, column, channel)` order, the same layout an image array has in
//! most numeric toolkits. Only one (gray) and three (RGB) channel buffers are
//! supported.

use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::{s, Array3, ArrayView1};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::draw::Color;

/// The channel layout of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channels {
    /// A single intensity channel.
    Gray,
    /// Red, green and blue channels.
    Rgb,
}

impl Channels {
    /// Number of values stored per pixel.
    pub fn count(&self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }

    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Channels::Gray),
            3 => Some(Channels::Rgb),
            _ => None,
        }
    }
}

/// The declared dimensions of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub height: usize,
    pub width: usize,
    pub channels: Channels,
}

impl Shape {
    pub const fn new(height: usize, width: usize, channels: Channels) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels.count())
    }
}

/// A fixed-size image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Array3<u8>,
}

impl Raster {
    /// Creates a raster with every value set to `value`.
    pub fn filled(height: usize, width: usize, channels: Channels, value: u8) -> Self {
        Self {
            data: Array3::from_elem((height, width, channels.count()), value),
        }
    }

    pub fn white(height: usize, width: usize, channels: Channels) -> Self {
        Self::filled(height, width, channels, u8::MAX)
    }

    pub fn black(height: usize, width: usize, channels: Channels) -> Self {
        Self::filled(height, width, channels, 0)
    }

    /// Wraps an existing `(row, column, channel)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (_, _, channels) = data.dim();
        anyhow::ensure!(
            Channels::from_count(channels).is_some(),
            "Unsupported channel count: {}",
            channels
        );
        Ok(Self { data })
    }

    /// Wraps an array whose channel axis is already known to be 1 or 3.
    pub(crate) fn from_parts(data: Array3<u8>) -> Self {
        debug_assert!(Channels::from_count(data.dim().2).is_some());
        Self { data }
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> Channels {
        match self.data.dim().2 {
            1 => Channels::Gray,
            _ => Channels::Rgb,
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.height(), self.width(), self.channels())
    }

    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Returns the value of channel `c` at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<u8> {
        self.data.get([y, x, c]).copied()
    }

    /// Returns all channel values at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<ArrayView1<'_, u8>> {
        if x < self.width() && y < self.height() {
            Some(self.data.slice(s![y, x, ..]))
        } else {
            None
        }
    }

    /// Writes one pixel. Coordinates outside the buffer are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width() || y >= self.height() {
            return;
        }
        match self.channels() {
            Channels::Gray => self.data[[y, x, 0]] = color.luma(),
            Channels::Rgb => {
                for (c, value) in color.0.iter().enumerate() {
                    self.data[[y, x, c]] = *value;
                }
            }
        }
    }

    /// Sets a block of rows and columns, both half-open, to `color`.
    ///
    /// Ranges reaching past the buffer are clipped.
    pub fn fill_region(&mut self, rows: Range<usize>, cols: Range<usize>, color: Color) {
        let rows = rows.start.min(self.height())..rows.end.min(self.height());
        let cols = cols.start.min(self.width())..cols.end.min(self.width());
        if rows.is_empty() || cols.is_empty() {
            return;
        }
        match self.channels() {
            Channels::Gray => self
                .data
                .slice_mut(s![rows, cols, 0])
                .fill(color.luma()),
            Channels::Rgb => {
                for (c, value) in color.0.iter().enumerate() {
                    self.data
                        .slice_mut(s![rows.clone(), cols.clone(), c])
                        .fill(*value);
                }
            }
        }
    }

    /// Copies the buffer into an `image` crate image.
    pub fn to_image(&self) -> Result<DynamicImage> {
        let (height, width, _) = self.data.dim();
        let raw: Vec<u8> = self.data.iter().copied().collect();
        let image = match self.channels() {
            Channels::Gray => {
                GrayImage::from_raw(width as u32, height as u32, raw).map(DynamicImage::ImageLuma8)
            }
            Channels::Rgb => {
                RgbImage::from_raw(width as u32, height as u32, raw).map(DynamicImage::ImageRgb8)
            }
        };
        image.context("Raster buffer does not match its dimensions")
    }

    /// Converts an `image` crate image, dropping alpha and converting color as needed.
    pub fn from_image(image: &DynamicImage, channels: Channels) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let raw = match channels {
            Channels::Gray => image.to_luma8().into_raw(),
            Channels::Rgb => image.to_rgb8().into_raw(),
        };
        let data = Array3::from_shape_vec((height, width, channels.count()), raw)
            .context("Failed to reshape image pixels")?;
        Ok(Self { data })
    }

    /// Writes the raster to `path`. The format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_image()?
            .save(path)
            .with_context(|| format!("Failed to write raster to {:?}", path))
    }

    /// SHA-256 over the shape and the raw values, as lowercase hex.
    pub fn digest(&self) -> String {
        let (height, width, channels) = self.data.dim();
        let mut hasher = Sha256::new();
        for dim in [height, width, channels] {
            hasher.update((dim as u64).to_le_bytes());
        }
        match self.data.as_slice() {
            Some(values) => hasher.update(values),
            None => hasher.update(self.data.iter().copied().collect::<Vec<u8>>()),
        }
        format!("{:x}", hasher.finalize())
    }
}
