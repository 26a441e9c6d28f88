//! The chamfer distance transform: the approximate distance of each pixel in
//! a binary image from the nearest pixel of interest.

use crate::definitions::DistanceImage;
use image::{GrayImage, Luma};
use std::cmp::min;

/// Cost of a horizontal or vertical step.
pub const ORTHOGONAL_COST: i32 = 3;

/// Cost of a diagonal step, approximating `ORTHOGONAL_COST * sqrt(2)`.
pub const DIAGONAL_COST: i32 = 4;

// Neighbours already visited by a row-major scan.
const BEFORE: [(i64, i64, i32); 4] = [
    (-1, -1, DIAGONAL_COST),
    (0, -1, ORTHOGONAL_COST),
    (1, -1, DIAGONAL_COST),
    (-1, 0, ORTHOGONAL_COST),
];

// Neighbours already visited by a reversed row-major scan.
const AFTER: [(i64, i64, i32); 4] = [
    (1, 1, DIAGONAL_COST),
    (0, 1, ORTHOGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (1, 0, ORTHOGONAL_COST),
];

/// Returns the 3-4 chamfer distance of every pixel from the nearest pixel
/// whose value equals `search`.
///
/// Pixels equal to `search` have distance 0. Each horizontal or vertical step
/// costs [`ORTHOGONAL_COST`] and each diagonal step [`DIAGONAL_COST`]. If no
/// pixel equals `search` every distance is `4 * (width + height)`.
///
/// For a binary mask, `distance_transform(mask, OFF)` measures how far each
/// foreground pixel lies inside the mask, that is its distance from the
/// nearest background pixel.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::definitions::ON;
/// use roadproc::distance_transform::distance_transform;
///
/// let image = gray_image!(
///     0,   0,   0,   0,   0;
///     0,   0,   0,   0,   0;
///     0,   0, 255,   0,   0;
///     0,   0,   0,   0,   0;
///     0,   0,   0,   0,   0);
///
/// let distances = gray_image!(type: i32,
///     8,   7,   6,   7,   8;
///     7,   4,   3,   4,   7;
///     6,   3,   0,   3,   6;
///     7,   4,   3,   4,   7;
///     8,   7,   6,   7,   8);
///
/// assert_pixels_eq!(distance_transform(&image, ON), distances);
/// # }
/// ```
pub fn distance_transform(image: &GrayImage, search: u8) -> DistanceImage {
    let (width, height) = image.dimensions();
    let bound = 4 * (width as i32 + height as i32);
    let mut out = DistanceImage::from_fn(width, height, |x, y| {
        Luma([if image.get_pixel(x, y)[0] == search { 0 } else { bound }])
    });

    for y in 0..height {
        for x in 0..width {
            relax(&mut out, x, y, &BEFORE);
        }
    }

    for y in (0..height).rev() {
        for x in (0..width).rev() {
            relax(&mut out, x, y, &AFTER);
        }
    }

    out
}

// Lowers the distance at (x, y) to the cheapest path through one of `neighbours`.
fn relax(distances: &mut DistanceImage, x: u32, y: u32, neighbours: &[(i64, i64, i32)]) {
    let (width, height) = distances.dimensions();
    let mut best = distances.get_pixel(x, y)[0];
    if best == 0 {
        return;
    }
    for &(dx, dy, cost) in neighbours {
        let nx = i64::from(x) + dx;
        let ny = i64::from(y) + dy;
        if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
            continue;
        }
        best = min(best, distances.get_pixel(nx as u32, ny as u32)[0] + cost);
    }
    distances.put_pixel(x, y, Luma([best]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{OFF, ON};

    #[test]
    fn test_distance_transform_without_sources() {
        let image = GrayImage::new(4, 3);
        let distances = distance_transform(&image, ON);
        assert!(distances.pixels().all(|p| p[0] == 28));
    }

    #[test]
    fn test_distance_transform_searches_for_off() {
        let image = gray_image!(
            255, 255, 255, 255;
            255, 255, 255, 255;
            255, 255, 255,   0);
        let expected = gray_image!(type: i32,
            11,  8,  7,  6;
            10,  7,  4,  3;
             9,  6,  3,  0);
        assert_pixels_eq!(distance_transform(&image, OFF), expected);
    }

    #[test]
    fn test_distance_transform_inside_mask() {
        let mask = gray_image!(0, 255, 255, 255, 0);
        let expected = gray_image!(type: i32, 0, 3, 6, 3, 0);
        assert_pixels_eq!(distance_transform(&mask, OFF), expected);
    }

    #[test]
    fn test_distance_transform_takes_nearest_source() {
        let image = gray_image!(255, 0, 0, 0, 0, 0, 255);
        let expected = gray_image!(type: i32, 0, 3, 6, 9, 6, 3, 0);
        assert_pixels_eq!(distance_transform(&image, ON), expected);
    }

    #[test]
    fn test_distance_transform_large_image_does_not_saturate() {
        let image = GrayImage::from_fn(300, 300, |x, y| {
            Luma([if (x, y) == (0, 0) { ON } else { OFF }])
        });
        let distances = distance_transform(&image, ON);
        assert_eq!(distances.get_pixel(299, 0)[0], 299 * 3);
        assert_eq!(distances.get_pixel(299, 299)[0], 299 * 4);
        assert_eq!(distances.get_pixel(299, 100)[0], 100 * 4 + 199 * 3);
    }

    #[test]
    fn test_distance_transform_empty_image() {
        let distances = distance_transform(&GrayImage::new(0, 0), ON);
        assert_eq!(distances.dimensions(), (0, 0));
    }
}
