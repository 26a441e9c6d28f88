//! Utils for testing and debugging.

use image::{GenericImageView, GrayImage, Luma, Pixel, Rgb, RgbImage};
use std::cmp;
use std::fmt::Write;

/// Helper for defining greyscale images.
///
/// Columns are separated by commas and rows by semi-colons.
/// By default a subpixel type of `u8` is used but this can be
/// overridden, as shown in the examples.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use image::{GrayImage, ImageBuffer, Luma};
///
/// // An empty grayscale image with pixel type Luma<u8>
/// let empty = gray_image!();
///
/// assert_pixels_eq!(
///     empty,
///     GrayImage::from_raw(0, 0, vec![]).unwrap()
/// );
///
/// // A single pixel grayscale image with pixel type Luma<u8>
/// let single_pixel = gray_image!(1);
///
/// assert_pixels_eq!(
///     single_pixel,
///     GrayImage::from_raw(1, 1, vec![1]).unwrap()
/// );
///
/// // A 3 * 2 grayscale image with pixel type Luma<u8>
/// let image = gray_image!(
///     1, 2, 3;
///     4, 5, 6);
///
/// let equivalent = GrayImage::from_raw(3, 2, vec![
///     1, 2, 3,
///     4, 5, 6
/// ]).unwrap();
///
/// assert_pixels_eq!(image, equivalent);
///
/// // A 3 * 2 grayscale image with pixel type Luma<i32>.
/// let image = gray_image!(type: i32,
///     1, 2, 3;
///     4, 5, 6);
///
/// let equivalent = ImageBuffer::<Luma<i32>, Vec<i32>>::from_raw(3, 2, vec![
///     1, 2, 3,
///     4, 5, 6
/// ]).unwrap();
///
/// assert_pixels_eq!(image, equivalent);
/// # }
/// ```
#[macro_export]
macro_rules! gray_image {
    // Empty image with default channel type u8
    () => {
        gray_image!(type: u8)
    };
    // Empty image with the given channel type
    (type: $channel_type:ty) => {
        {
            use image::{ImageBuffer, Luma};
            ImageBuffer::<Luma<$channel_type>, Vec<$channel_type>>::new(0, 0)
        }
    };
    // Non-empty image of default channel type u8
    ($( $( $x: expr ),*);*) => {
        gray_image!(type: u8, $( $( $x ),*);*)
    };
    // Non-empty image of given channel type
    (type: $channel_type:ty, $( $( $x: expr ),*);*) => {
        {
            use image::{ImageBuffer, Luma};

            let nested_array = [ $( [ $($x),* ] ),* ];
            let height = nested_array.len() as u32;
            let width = nested_array[0].len() as u32;

            let flat_array: Vec<_> = nested_array.iter()
                .flat_map(|row| row.into_iter())
                .cloned()
                .collect();

            ImageBuffer::<Luma<$channel_type>, Vec<$channel_type>>::from_raw(width, height, flat_array)
                .unwrap()
        }
    }
}

/// Helper for defining RGB images.
///
/// Pixels are delineated by square brackets, columns are
/// separated by commas and rows are separated by semi-colons.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use image::RgbImage;
///
/// let image = rgb_image!(
///     [1, 2, 3], [ 4,  5,  6];
///     [7, 8, 9], [10, 11, 12]);
///
/// let equivalent = RgbImage::from_raw(2, 2, vec![
///     1, 2, 3,  4,  5,  6,
///     7, 8, 9, 10, 11, 12
/// ]).unwrap();
///
/// assert_pixels_eq!(image, equivalent);
/// # }
/// ```
#[macro_export]
macro_rules! rgb_image {
    ($( $( [$r: expr, $g: expr, $b: expr]),*);*) => {
        {
            use image::{ImageBuffer, Rgb};

            let nested_array = [$( [ $([$r, $g, $b]),*]),*];
            let height = nested_array.len() as u32;
            let width = nested_array[0].len() as u32;

            let flat_array: Vec<u8> = nested_array.iter()
                .flat_map(|row| row.into_iter().flat_map(|p| p.into_iter()))
                .cloned()
                .collect();

            ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(width, height, flat_array)
                .unwrap()
        }
    }
}

/// Panics if any pixels differ between the two input images.
///
/// The first few differing pixels are reported, with their coordinates.
#[macro_export]
macro_rules! assert_pixels_eq {
    ($actual:expr, $expected:expr) => {{
        $crate::assert_dimensions_match!($actual, $expected);
        match $crate::utils::pixel_diff_summary(&$actual, &$expected) {
            None => {}
            Some(err) => panic!("{}", err),
        };
    }};
}

/// Panics if image dimensions do not match.
#[macro_export]
macro_rules! assert_dimensions_match {
    ($actual:expr, $expected:expr) => {{
        let actual_dim = $actual.dimensions();
        let expected_dim = $expected.dimensions();

        if actual_dim != expected_dim {
            panic!(
                "dimensions do not match. \
                 actual: {:?}, expected: {:?}",
                actual_dim, expected_dim
            )
        }
    }};
}

/// Lists pixels that differ between left and right images.
pub fn pixel_diffs<I, J, P>(actual: &I, expected: &J) -> Vec<((u32, u32), (P, P))>
where
    P: Pixel + PartialEq,
    I: GenericImageView<Pixel = P>,
    J: GenericImageView<Pixel = P>,
{
    if actual.dimensions() != expected.dimensions() {
        panic!(
            "dimensions do not match. actual: {:?}, expected: {:?}",
            actual.dimensions(),
            expected.dimensions()
        )
    }

    actual
        .pixels()
        .zip(expected.pixels())
        .filter(|((_, _, p), (_, _, q))| p != q)
        .map(|((x, y, p), (_, _, q))| ((x, y), (p, q)))
        .collect()
}

/// Gives a summary description of the first few pixel diffs, or `None`
/// if the images are identical.
pub fn pixel_diff_summary<I, J, P>(actual: &I, expected: &J) -> Option<String>
where
    P: Pixel + PartialEq + std::fmt::Debug,
    I: GenericImageView<Pixel = P>,
    J: GenericImageView<Pixel = P>,
{
    let diffs = pixel_diffs(actual, expected);
    if diffs.is_empty() {
        return None;
    }

    let mut err = String::from("pixels do not match.");
    for ((x, y), (p, q)) in diffs.iter().take(5) {
        let _ = write!(err, "\n({}, {}): actual {:?}, expected {:?}", x, y, p, q);
    }
    if diffs.len() > 5 {
        let _ = write!(err, "\n... and {} more", diffs.len() - 5);
    }
    Some(err)
}

/// Gray image to use in benchmarks. This is neither noise nor
/// similar to natural images - it's just a convenience method
/// to produce an image that's not constant.
pub fn gray_bench_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([(x % 7 + y % 6) as u8]))
}

/// RGB image to use in benchmarks. See comment on `gray_bench_image`.
pub fn rgb_bench_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = (x % 7 + y % 6) as u8;
        let g = 255u8 - r;
        let b = cmp::min(r, g);
        Rgb([r, g, b])
    })
}

/// Binary image to use in benchmarks: a grid of thick horizontal and
/// vertical bars, roughly what a road mask looks like before cleanup.
pub fn road_bench_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let on_road = (x % 40) < 7 || (y % 50) < 5;
        let border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
        Luma([if on_road && !border { 255 } else { 0 }])
    })
}
