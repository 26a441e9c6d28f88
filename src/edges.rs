//! Functions for detecting edges in images.

use crate::binary::threshold_distances;
use crate::definitions::{DistanceImage, Image, OFF, ON};
use crate::error::{Error, Result};
use crate::filter::{gaussian_blur_5x5, grayscale};
use crate::gradients::{gradient_magnitudes, horizontal_sobel, sobel_gradient_magnitudes, vertical_sobel};
use crate::point::{Point, EIGHT_NEIGHBOURS};
use image::{GrayImage, Luma, Pixel};
use log::debug;

/// Marks every pixel with a non-zero Sobel gradient magnitude.
pub fn sobel_edges(image: &GrayImage) -> GrayImage {
    threshold_distances(&sobel_gradient_magnitudes(image), 1)
}

/// Hysteresis thresholds for [`canny`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CannyThresholds {
    lower: i32,
    upper: i32,
}

impl CannyThresholds {
    /// Pixels with a magnitude of at least `upper` start an edge, which then
    /// extends through neighbours with a magnitude of at least `lower`.
    ///
    /// Returns [`Error::InvalidParameter`] if `lower > upper`.
    pub fn new(lower: i32, upper: i32) -> Result<Self> {
        if lower > upper {
            return Err(Error::InvalidParameter {
                name: "lower",
                reason: format!("lower threshold {} exceeds upper threshold {}", lower, upper),
            });
        }
        Ok(CannyThresholds { lower, upper })
    }

    /// Threshold for extending an edge.
    pub fn lower(&self) -> i32 {
        self.lower
    }

    /// Threshold for starting an edge.
    pub fn upper(&self) -> i32 {
        self.upper
    }
}

/// Runs the Canny edge detector on an image of any 8-bit pixel type.
///
/// The image is converted to grayscale and smoothed with the 5x5 Gaussian
/// kernel. Sobel gradient magnitudes are thinned by [`non_maximum_suppression`]
/// and linked by [`hysteresis`].
///
/// Returns a binary image.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use image::{GrayImage, Luma};
/// use roadproc::edges::{canny, CannyThresholds};
///
/// // A uniform image has no edges.
/// let image = GrayImage::from_pixel(8, 8, Luma([90]));
/// let thresholds = CannyThresholds::new(0, 0).unwrap();
/// assert_pixels_eq!(canny(&image, thresholds), GrayImage::new(8, 8));
/// # }
/// ```
pub fn canny<P>(image: &Image<P>, thresholds: CannyThresholds) -> GrayImage
where
    P: Pixel<Subpixel = u8>,
{
    hysteresis(&canny_magnitudes(image), thresholds)
}

/// The thinned gradient magnitudes computed by [`canny`] before hysteresis.
pub fn canny_magnitudes<P>(image: &Image<P>) -> DistanceImage
where
    P: Pixel<Subpixel = u8>,
{
    let blurred = gaussian_blur_5x5(&grayscale(image));
    let gx = horizontal_sobel(&blurred);
    let gy = vertical_sobel(&blurred);
    let magnitudes = gradient_magnitudes(&gx, &gy);
    non_maximum_suppression(&magnitudes, &gx, &gy)
}

/// Keeps only the magnitudes that are strict local maxima along the gradient
/// direction.
///
/// The direction `atan2(gy, gx)` is rounded to the nearest multiple of 45
/// degrees and the pixel is compared with its two neighbours along it. A
/// direction exactly halfway between two multiples has no neighbours to win
/// against, so the pixel is suppressed. Border pixels are always zero.
///
/// # Panics
///
/// If the three images have different dimensions.
pub fn non_maximum_suppression(
    magnitudes: &DistanceImage,
    gx: &DistanceImage,
    gy: &DistanceImage,
) -> DistanceImage {
    assert_eq!(magnitudes.dimensions(), gx.dimensions());
    assert_eq!(magnitudes.dimensions(), gy.dimensions());

    let (width, height) = magnitudes.dimensions();
    let mut out = DistanceImage::new(width, height);
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let angle = f64::from(gy.get_pixel(x, y)[0])
                .atan2(f64::from(gx.get_pixel(x, y)[0]))
                .to_degrees();
            let step = match gradient_step(angle) {
                Some(step) => step,
                None => continue,
            };

            let m = magnitudes.get_pixel(x, y)[0];
            let ahead = magnitudes.get_pixel((x as i64 + step.x) as u32, (y as i64 + step.y) as u32)[0];
            let behind = magnitudes.get_pixel((x as i64 - step.x) as u32, (y as i64 - step.y) as u32)[0];
            if m > ahead && m > behind {
                out.put_pixel(x, y, Luma([m]));
            }
        }
    }
    out
}

// Image-space step along a gradient direction in degrees, with y pointing down.
fn gradient_step(angle: f64) -> Option<Point<i64>> {
    let abs = angle.abs();
    if abs < 22.5 || abs > 157.5 {
        Some(Point::new(1, 0))
    } else if (angle > 22.5 && angle < 67.5) || (angle < -112.5 && angle > -157.5) {
        Some(Point::new(1, -1))
    } else if abs > 67.5 && abs < 112.5 {
        Some(Point::new(0, -1))
    } else if (angle > 112.5 && angle < 157.5) || (angle < -22.5 && angle > -67.5) {
        Some(Point::new(-1, -1))
    } else {
        None
    }
}

/// Links edges through thresholded magnitudes.
///
/// Every pixel with a magnitude of at least `thresholds.upper()` is an edge,
/// and so is every pixel with a magnitude of at least `thresholds.lower()`
/// that is eight-connected to an edge. Pixels with zero magnitude are never
/// edges. Uses an explicit stack, so long edges do not recurse.
pub fn hysteresis(magnitudes: &DistanceImage, thresholds: CannyThresholds) -> GrayImage {
    let (width, height) = magnitudes.dimensions();
    let mut out = GrayImage::new(width, height);
    let mut stack = vec![];
    let mut seeds = 0;

    let strong = |m: i32| m > 0 && m >= thresholds.upper;
    let weak = |m: i32| m > 0 && m >= thresholds.lower;

    for y in 0..height {
        for x in 0..width {
            if !strong(magnitudes.get_pixel(x, y)[0]) || out.get_pixel(x, y)[0] == ON {
                continue;
            }
            seeds += 1;
            out.put_pixel(x, y, Luma([ON]));
            stack.push(Point::new(x, y));

            while let Some(p) = stack.pop() {
                for offset in &EIGHT_NEIGHBOURS {
                    let n = match (p.to_i64() + *offset).in_bounds(width, height) {
                        Some(n) => n,
                        None => continue,
                    };
                    if out.get_pixel(n.x, n.y)[0] == OFF && weak(magnitudes.get_pixel(n.x, n.y)[0]) {
                        out.put_pixel(n.x, n.y, Luma([ON]));
                        stack.push(n);
                    }
                }
            }
        }
    }

    debug!("hysteresis grew edges from {} seeds", seeds);
    out
}


#[cfg(not(miri))]
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::proptest_utils::arbitrary_image;
    use image::Rgb;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn proptest_canny_uniform_image_has_no_edges(
            w in 1u32..20,
            h in 1u32..20,
            value in any::<u8>(),
            lower in -10i32..50,
            extra in 0i32..50,
        ) {
            let image = GrayImage::from_pixel(w, h, Luma([value]));
            let thresholds = CannyThresholds::new(lower, lower + extra).unwrap();
            prop_assert_eq!(canny(&image, thresholds), GrayImage::new(w, h));
        }

        #[test]
        fn proptest_canny_is_binary(img in arbitrary_image::<Rgb<u8>>(0..16, 0..16)) {
            let thresholds = CannyThresholds::new(20, 60).unwrap();
            let edges = canny(&img, thresholds);
            prop_assert_eq!(edges.dimensions(), img.dimensions());
            prop_assert!(edges.pixels().all(|p| p[0] == ON || p[0] == OFF));
        }
    }
}
