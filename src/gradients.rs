//! Functions for computing gradients of image intensities.

use crate::definitions::DistanceImage;
use crate::kernel::{Kernel, SOBEL_X, SOBEL_Y};
use image::{GrayImage, Luma};
use num::integer::Roots;

/// Convolves an image with the [`SOBEL_X`] kernel. Positive where intensity
/// increases to the right.
///
/// Kernel taps that fall outside the image contribute nothing.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::gradients::horizontal_sobel;
///
/// let image = gray_image!(
///     0, 0, 10, 10;
///     0, 0, 10, 10;
///     0, 0, 10, 10);
///
/// let gradients = gray_image!(type: i32,
///     0, 30, 30, -30;
///     0, 40, 40, -40;
///     0, 30, 30, -30);
///
/// assert_pixels_eq!(horizontal_sobel(&image), gradients);
/// # }
/// ```
pub fn horizontal_sobel(image: &GrayImage) -> DistanceImage {
    filter_zero_padded(image, &SOBEL_X)
}

/// Convolves an image with the [`SOBEL_Y`] kernel. Positive where intensity
/// increases towards the top of the image.
///
/// Kernel taps that fall outside the image contribute nothing.
pub fn vertical_sobel(image: &GrayImage) -> DistanceImage {
    filter_zero_padded(image, &SOBEL_Y)
}

/// Returns the gradient magnitude `sqrt(gx^2 + gy^2)` at each pixel,
/// rounded down.
///
/// # Panics
///
/// If `gx` and `gy` have different dimensions.
pub fn gradient_magnitudes(gx: &DistanceImage, gy: &DistanceImage) -> DistanceImage {
    assert_eq!(
        gx.dimensions(),
        gy.dimensions(),
        "gradient images must have the same dimensions"
    );
    DistanceImage::from_fn(gx.width(), gx.height(), |x, y| {
        let h = i64::from(gx.get_pixel(x, y)[0]);
        let v = i64::from(gy.get_pixel(x, y)[0]);
        Luma([(h * h + v * v).sqrt() as i32])
    })
}

/// Sobel gradient magnitudes of a grayscale image.
pub fn sobel_gradient_magnitudes(image: &GrayImage) -> DistanceImage {
    gradient_magnitudes(&horizontal_sobel(image), &vertical_sobel(image))
}

fn filter_zero_padded(image: &GrayImage, kernel: &Kernel) -> DistanceImage {
    let (width, height) = image.dimensions();
    let taps: Vec<_> = kernel.taps().filter(|&(_, w)| w != 0).collect();
    let divisor = kernel.divisor();

    DistanceImage::from_fn(width, height, |x, y| {
        let mut sum = 0i32;
        for &(offset, weight) in &taps {
            let px = i64::from(x) + offset.x;
            let py = i64::from(y) + offset.y;
            if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                continue;
            }
            sum += weight * i32::from(image.get_pixel(px as u32, py as u32)[0]);
        }
        Luma([sum / divisor])
    })
}
