//! Affine transforms and resampling.
//!
//! [`AffineTransform`] maps source coordinates to destination coordinates.
//! [`warp_affine`] lifts it into an `imageproc` [`Projection`] and resamples
//! the source bilinearly.

use anyhow::{Context, Result};
use image::{imageops, DynamicImage, ImageBuffer, Luma, Pixel, Rgb};
use imageproc::{
    definitions::Image,
    geometric_transformations::{warp_into, Interpolation, Projection},
};

use crate::raster::Raster;

/// How samples outside the source buffer are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// Every out-of-bounds sample reads this value on all channels.
    Constant(u8),
}

impl Default for Border {
    fn default() -> Self {
        Border::Constant(0)
    }
}

/// A 2x3 affine matrix, `[x', y'] = M * [x, y, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub m: [[f64; 3]; 2],
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    };

    /// Rotation by `angle` degrees about `center`, combined with uniform `scale`.
    ///
    /// Positive angles turn the image counter-clockwise as displayed (y axis
    /// pointing down).
    pub fn rotation(center: (f64, f64), angle: f64, scale: f64) -> Self {
        let theta = angle.to_radians();
        let alpha = scale * theta.cos();
        let beta = scale * theta.sin();
        let (cx, cy) = center;
        Self {
            m: [
                [alpha, beta, (1.0 - alpha) * cx - beta * cy],
                [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
            ],
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [[a, b, c], [d, e, f]] = self.m;
        (a * x + b * y + c, d * x + e * y + f)
    }

    pub fn determinant(&self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    pub fn invert(&self) -> Result<Self> {
        let det = self.determinant();
        anyhow::ensure!(det.abs() > f64::EPSILON, "Affine transform is singular");
        let [[a, b, c], [d, e, f]] = self.m;
        let (ia, ib) = (e / det, -b / det);
        let (id, ie) = (-d / det, a / det);
        Ok(Self {
            m: [
                [ia, ib, -(ia * c + ib * f)],
                [id, ie, -(id * c + ie * f)],
            ],
        })
    }
}

/// Pads `src` by one `fill` pixel on every side and warps it into a
/// `width` x `height` buffer.
///
/// Bilinear sampling in `imageproc` drops any sample whose neighbours leave
/// the image, so the padding lets edge pixels blend with the border value.
fn warp_padded<P>(
    src: &Image<P>,
    projection: &Projection,
    fill: P,
    width: u32,
    height: u32,
) -> Image<P>
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    let mut padded = ImageBuffer::from_pixel(src.width() + 2, src.height() + 2, fill);
    imageops::overlay(&mut padded, src, 1, 1);
    let mut out = ImageBuffer::from_pixel(width, height, fill);
    warp_into(&padded, projection, Interpolation::Bilinear, fill, &mut out);
    out
}

/// Resamples `src` through `transform` into a `width` x `height` raster.
///
/// Fails only when the transform cannot be inverted.
pub fn warp_affine(
    src: &Raster,
    transform: &AffineTransform,
    width: usize,
    height: usize,
    border: Border,
) -> Result<Raster> {
    transform.invert()?;
    let Border::Constant(fill) = border;
    let width = u32::try_from(width).context("Output width out of range")?;
    let height = u32::try_from(height).context("Output height out of range")?;

    // Source coordinates are shifted by the one pixel of padding.
    let [[a, b, c], [d, e, f]] = transform.m;
    let projection = Projection::from_matrix([
        a as f32,
        b as f32,
        (c - a - b) as f32,
        d as f32,
        e as f32,
        (f - d - e) as f32,
        0.0,
        0.0,
        1.0,
    ])
    .context("Affine transform is singular")?;

    let warped = match src.to_image()? {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(warp_padded(&gray, &projection, Luma([fill]), width, height))
        }
        other => DynamicImage::ImageRgb8(warp_padded(
            &other.to_rgb8(),
            &projection,
            Rgb([fill; 3]),
            width,
            height,
        )),
    };
    Raster::from_image(&warped, src.channels())
}

/// Rotates `src` about `center`, keeping the output at `width` x `height`.
pub fn rotate(
    src: &Raster,
    center: (f64, f64),
    angle: f64,
    width: usize,
    height: usize,
    border: Border,
) -> Result<Raster> {
    let transform = AffineTransform::rotation(center, angle, 1.0);
    warp_affine(src, &transform, width, height, border)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::raster::Channels;

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_rotation_keeps_center_fixed() {
        let t = AffineTransform::rotation((150.0, 100.0), 17.0, 1.0);
        assert!(approx(t.apply(150.0, 100.0), (150.0, 100.0)));
    }

    #[test]
    fn test_quarter_turn_direction() {
        // Counter-clockwise on screen: a point to the right of center moves up.
        let t = AffineTransform::rotation((0.0, 0.0), 90.0, 1.0);
        assert!(approx(t.apply(10.0, 0.0), (0.0, -10.0)));
    }

    #[test]
    fn test_invert_round_trip() {
        let t = AffineTransform::rotation((40.0, 25.0), -33.0, 1.5);
        let inv = t.invert().unwrap();
        let (x, y) = t.apply(12.0, 7.0);
        assert!(approx(inv.apply(x, y), (12.0, 7.0)));
    }

    #[test]
    fn test_singular_transform_rejected() {
        let t = AffineTransform {
            m: [[1.0, 2.0, 0.0], [2.0, 4.0, 0.0]],
        };
        assert!(t.invert().is_err());
        let src = Raster::white(4, 4, Channels::Gray);
        assert!(warp_affine(&src, &t, 4, 4, Border::default()).is_err());
    }

    #[test]
    fn test_edge_pixels_blend_with_border() {
        let src = Raster::white(3, 3, Channels::Gray);
        let out = warp_affine(&src, &AffineTransform::IDENTITY, 3, 3, Border::Constant(9)).unwrap();
        assert_eq!(out, src);

        let out = warp_affine(&src, &AffineTransform::IDENTITY, 5, 4, Border::Constant(9)).unwrap();
        assert_eq!(out.get(2, 2, 0), Some(255));
        assert_eq!(out.get(3, 2, 0), Some(9));
        assert_eq!(out.get(1, 3, 0), Some(9));
    }
}
