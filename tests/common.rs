use ndarray::Axis;
use tablefix::prelude::{Raster, Rect};
use tempfile::{tempdir, TempDir};

/// Number of pixels whose every channel equals `value`.
#[allow(dead_code)]
pub fn count_pixels(raster: &Raster, value: u8) -> usize {
    raster
        .as_array()
        .lanes(Axis(2))
        .into_iter()
        .filter(|px| px.iter().all(|&v| v == value))
        .count()
}

/// Whether every pixel of `rect` has all channels equal to `value`.
#[allow(dead_code)]
pub fn region_is(raster: &Raster, rect: Rect, value: u8) -> bool {
    (rect.y..rect.bottom()).all(|y| {
        (rect.x..rect.right()).all(|x| {
            raster
                .pixel(x as usize, y as usize)
                .map(|px| px.iter().all(|&v| v == value))
                .unwrap_or(false)
        })
    })
}

/// All channel values at (`x`, `y`).
#[allow(dead_code)]
pub fn pixel(raster: &Raster, x: usize, y: usize) -> Vec<u8> {
    raster.pixel(x, y).unwrap().to_vec()
}

#[allow(dead_code)]
pub fn scratch_dir() -> TempDir {
    tempdir().unwrap()
}
