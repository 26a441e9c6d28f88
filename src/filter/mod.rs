//! Functions for filtering images: integer convolution, the fixed
//! Gaussian blur used ahead of edge detection, and grayscale conversion.

use image::{GrayImage, Luma, Pixel};

use crate::definitions::{Clamp, Image};
use crate::kernel::{Kernel, GAUSSIAN_5X5};
use std::cmp::{max, min};

/// Returns the 2d correlation of an image with `kernel`, divided by the
/// kernel's divisor and clamped to `[0, 255]`. Every channel is filtered
/// independently. Pads by continuity.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::filter::convolve;
/// use roadproc::kernel::Kernel;
///
/// let image = gray_image!(
///     10, 20, 30;
///     40, 50, 60);
///
/// // Mean of each pixel and its right-hand neighbour.
/// let data = [0, 1, 1];
/// let kernel = Kernel::new(&data, 3, 1, 2);
///
/// let expected = gray_image!(
///     15, 25, 30;
///     45, 55, 60);
///
/// assert_pixels_eq!(convolve(&image, &kernel), expected);
/// # }
/// ```
pub fn convolve<P>(image: &Image<P>, kernel: &Kernel) -> Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let mut out = Image::<P>::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let num_channels = P::CHANNEL_COUNT as usize;
    let taps: Vec<_> = kernel.taps().filter(|&(_, w)| w != 0).collect();
    let divisor = i64::from(kernel.divisor());
    let (w, h) = (i64::from(width), i64::from(height));
    let mut acc = vec![0i64; num_channels];

    for y in 0..height {
        for x in 0..width {
            for &(offset, weight) in &taps {
                let x_p = min(w - 1, max(0, i64::from(x) + offset.x)) as u32;
                let y_p = min(h - 1, max(0, i64::from(y) + offset.y)) as u32;
                let p = image.get_pixel(x_p, y_p);
                for (a, &c) in acc.iter_mut().zip(p.channels()) {
                    *a += i64::from(weight) * i64::from(c);
                }
            }
            let out_channels = out.get_pixel_mut(x, y).channels_mut();
            for (a, c) in acc.iter_mut().zip(out_channels.iter_mut()) {
                *c = <u8 as Clamp<i64>>::clamp(*a / divisor);
                *a = 0;
            }
        }
    }

    out
}

/// Smooths an image with the fixed 5x5 [`GAUSSIAN_5X5`] kernel (weights summing to 159).
pub fn gaussian_blur_5x5<P>(image: &Image<P>) -> Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    convolve(image, &GAUSSIAN_5X5)
}

/// Converts an 8-bit image of any pixel type to grayscale.
///
/// Each output pixel is the unweighted mean of the first three channels, so an
/// alpha channel is ignored. Images with fewer than three channels keep their
/// first channel.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::filter::grayscale;
///
/// let image = rgb_image!(
///     [30, 60, 90], [255, 255, 0]);
///
/// assert_pixels_eq!(grayscale(&image), gray_image!(60, 170));
/// # }
/// ```
pub fn grayscale<P>(image: &Image<P>) -> GrayImage
where
    P: Pixel<Subpixel = u8>,
{
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let channels = image.get_pixel(x, y).channels();
        if channels.len() < 3 {
            Luma([channels[0]])
        } else {
            let sum: u32 = channels[..3].iter().map(|&c| u32::from(c)).sum();
            Luma([(sum / 3) as u8])
        }
    })
}
