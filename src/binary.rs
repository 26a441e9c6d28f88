//! Pixel-wise set algebra and small utilities on binary images.
//!
//! A binary image is a [`GrayImage`] whose pixels are all [`ON`] or [`OFF`].

use crate::definitions::{DistanceImage, OFF, ON};
use crate::error::{Error, Result};
use image::{GrayImage, Luma};

/// Pixel-wise OR: `ON` wherever either input is `ON`.
///
/// # Panics
///
/// If the images have different dimensions.
pub fn union(left: &GrayImage, right: &GrayImage) -> GrayImage {
    combine(left, right, |l, r| l == ON || r == ON)
}

/// Pixel-wise set subtraction: `ON` only where `left` is `ON` and `right` is `OFF`.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::binary::difference;
///
/// let left = gray_image!(
///     255, 255;
///       0, 255);
///
/// let right = gray_image!(
///     255,   0;
///     255,   0);
///
/// assert_pixels_eq!(
///     difference(&left, &right),
///     gray_image!(
///         0, 255;
///         0, 255));
/// # }
/// ```
///
/// # Panics
///
/// If the images have different dimensions.
pub fn difference(left: &GrayImage, right: &GrayImage) -> GrayImage {
    combine(left, right, |l, r| l == ON && r == OFF)
}

fn combine<F>(left: &GrayImage, right: &GrayImage, f: F) -> GrayImage
where
    F: Fn(u8, u8) -> bool,
{
    assert_eq!(
        left.dimensions(),
        right.dimensions(),
        "binary images must have the same dimensions"
    );
    let mut out = GrayImage::new(left.width(), left.height());
    for ((o, l), r) in out.iter_mut().zip(left.iter()).zip(right.iter()) {
        *o = if f(*l, *r) { ON } else { OFF };
    }
    out
}

/// Clears every pixel of `image` that is `ON` in `mask`, returning true if any
/// pixel of `image` changed.
///
/// # Panics
///
/// If the images have different dimensions.
pub fn remove_matches(image: &mut GrayImage, mask: &GrayImage) -> bool {
    assert_eq!(
        image.dimensions(),
        mask.dimensions(),
        "binary images must have the same dimensions"
    );
    let mut changed = false;
    for (p, m) in image.iter_mut().zip(mask.iter()) {
        if *m == ON && *p != OFF {
            *p = OFF;
            changed = true;
        }
    }
    changed
}

/// Swaps foreground and background. Any value other than `ON` becomes `ON`.
pub fn invert(image: &GrayImage) -> GrayImage {
    let mut out = image.clone();
    for p in out.iter_mut() {
        *p = if *p == ON { OFF } else { ON };
    }
    out
}

/// Returns a copy of `image` with its outermost rows and columns set to `OFF`.
pub fn remove_border(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
            Luma([OFF])
        } else {
            *image.get_pixel(x, y)
        }
    })
}

/// Majority filter over a `size * size` window clipped to the image.
///
/// A pixel is `ON` in the output if at least as many pixels in its window are
/// `ON` as are not. Ties go to the foreground.
///
/// Returns [`Error::EvenKernelSize`] if `size` is even.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::binary::clean;
///
/// let image = gray_image!(
///       0,   0,   0,   0;
///       0, 255,   0,   0;
///     255, 255, 255,   0;
///     255, 255, 255, 255);
///
/// // The pixel at (0, 1) sees three foreground and three background
/// // pixels, so it is switched on.
/// let cleaned = gray_image!(
///       0,   0,   0,   0;
///     255,   0,   0,   0;
///     255, 255, 255, 255;
///     255, 255, 255, 255);
///
/// assert_pixels_eq!(clean(&image, 3).unwrap(), cleaned);
/// assert!(clean(&image, 4).is_err());
/// # }
/// ```
pub fn clean(image: &GrayImage, size: u32) -> Result<GrayImage> {
    if size % 2 == 0 {
        return Err(Error::EvenKernelSize(size));
    }
    let (width, height) = image.dimensions();
    let r = size / 2;

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let (x0, x1) = (x.saturating_sub(r), (x + r).min(width - 1));
        let (y0, y1) = (y.saturating_sub(r), (y + r).min(height - 1));
        let mut on = 0u32;
        for wy in y0..=y1 {
            for wx in x0..=x1 {
                if image.get_pixel(wx, wy)[0] == ON {
                    on += 1;
                }
            }
        }
        let total = (x1 - x0 + 1) * (y1 - y0 + 1);
        Luma([if 2 * on >= total { ON } else { OFF }])
    }))
}

/// Binarises a distance or magnitude grid: `ON` where the value is at least `threshold`.
pub fn threshold_distances(grid: &DistanceImage, threshold: i32) -> GrayImage {
    GrayImage::from_fn(grid.width(), grid.height(), |x, y| {
        Luma([if grid.get_pixel(x, y)[0] >= threshold {
            ON
        } else {
            OFF
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        let a = gray_image!(
            255, 0;
            0, 0);
        let b = gray_image!(
            0, 0;
            0, 255);
        assert_pixels_eq!(
            union(&a, &b),
            gray_image!(
                255, 0;
                0, 255)
        );
    }

    #[test]
    #[should_panic]
    fn test_union_dimension_mismatch() {
        union(&GrayImage::new(2, 2), &GrayImage::new(3, 2));
    }

    #[test]
    fn test_remove_matches_reports_change() {
        let mut image = gray_image!(
            255, 255;
            0, 255);
        let mask = gray_image!(
            255, 0;
            255, 0);
        assert!(remove_matches(&mut image, &mask));
        assert_pixels_eq!(
            image,
            gray_image!(
                0, 255;
                0, 255)
        );
        assert!(!remove_matches(&mut image, &mask));
    }

    #[test]
    fn test_invert() {
        let image = gray_image!(
            255, 0;
            0, 255);
        assert_pixels_eq!(
            invert(&image),
            gray_image!(
                0, 255;
                255, 0)
        );
        assert_pixels_eq!(invert(&invert(&image)), image);
    }

    #[test]
    fn test_remove_border() {
        let image = GrayImage::from_pixel(4, 3, Luma([ON]));
        assert_pixels_eq!(
            remove_border(&image),
            gray_image!(
                0, 0, 0, 0;
                0, 255, 255, 0;
                0, 0, 0, 0)
        );
    }

    #[test]
    fn test_remove_border_tiny_image() {
        let image = GrayImage::from_pixel(1, 1, Luma([ON]));
        assert_pixels_eq!(remove_border(&image), gray_image!(0));
    }

    #[test]
    fn test_clean_size_one_is_identity() {
        let image = gray_image!(
            255, 0, 255;
            0, 255, 0);
        assert_pixels_eq!(clean(&image, 1).unwrap(), image);
    }

    #[test]
    fn test_clean_removes_isolated_pixel() {
        let mut image = GrayImage::new(5, 5);
        image.put_pixel(2, 2, Luma([ON]));
        assert_pixels_eq!(clean(&image, 3).unwrap(), GrayImage::new(5, 5));
    }

    #[test]
    fn test_clean_rejects_even_size() {
        assert_eq!(
            clean(&GrayImage::new(3, 3), 2),
            Err(Error::EvenKernelSize(2))
        );
    }

    #[test]
    fn test_threshold_distances() {
        let grid = gray_image!(type: i32,
            -3, 0, 1;
            4, 7, 2);
        assert_pixels_eq!(
            threshold_distances(&grid, 2),
            gray_image!(
                0, 0, 0;
                255, 255, 255)
        );
    }
}
