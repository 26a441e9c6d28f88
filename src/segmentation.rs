//! Tolerance-based region growing over colour images.

use crate::definitions::{Image, ON};
use crate::error::{Error, Result};
use crate::pixel_group::PixelGroup;
use crate::point::{Point, EIGHT_NEIGHBOURS};
use image::{GrayImage, Pixel};
use log::debug;
use std::collections::VecDeque;

/// Seeds are not placed closer than this to the image border.
pub const SEED_MARGIN: u32 = 3;

/// Absolute difference in luma between two pixels, using the Rec. 601
/// weights `0.299 R + 0.587 G + 0.114 B` over the first three channels.
/// Further channels, such as alpha, are ignored.
///
/// Returns [`Error::TooFewChannels`] if either pixel has fewer than three channels.
pub fn intensity_distance(a: &[u8], b: &[u8]) -> Result<f64> {
    Ok((luma(a)? - luma(b)?).abs())
}

fn luma(channels: &[u8]) -> Result<f64> {
    match channels {
        [r, g, b, ..] => Ok(0.299 * f64::from(*r) + 0.587 * f64::from(*g) + 0.114 * f64::from(*b)),
        _ => Err(Error::TooFewChannels {
            required: 3,
            found: channels.len(),
        }),
    }
}

/// Euclidean distance between two pixels, treating their channels as vectors.
///
/// Returns [`Error::LengthMismatch`] if the pixels have different numbers of channels.
pub fn euclidean_distance(a: &[u8], b: &[u8]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&p, &q)| {
            let d = f64::from(p) - f64::from(q);
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}

/// Splits an image into regions by growing from a regular grid of seeds.
///
/// Seeds are placed every `seed_distance` pixels in each direction, starting
/// [`SEED_MARGIN`] pixels in from the top left and staying at least that far
/// from the bottom and right edges. They are visited column by column, top to
/// bottom within a column. Each
/// seed grows an eight-connected region, stepping from a pixel to a neighbour
/// when `distance(neighbour, pixel) < tolerance`. The comparison is with the
/// pixel being expanded rather than with the seed, so a region can drift
/// gradually in colour.
///
/// A pixel belongs to at most one region, the first to reach it. Pixels that
/// are `ON` in `edges` are never added to any region. Every seed yields a
/// group, which is empty if the seed was already claimed or lies on an edge.
///
/// Returns [`Error::InvalidParameter`] if `seed_distance` is zero or `edges`
/// does not match the image dimensions, and propagates any error from `distance`.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use image::{Rgb, RgbImage};
/// use roadproc::segmentation::{euclidean_distance, segment};
///
/// // Dark on the left, light on the right.
/// let image = RgbImage::from_fn(10, 10, |x, _| {
///     if x < 5 { Rgb([10, 10, 10]) } else { Rgb([200, 200, 200]) }
/// });
///
/// let groups = segment(&image, None, 20.0, 3, euclidean_distance).unwrap();
/// let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
/// assert_eq!(sizes, vec![50, 0, 50, 0]);
/// # }
/// ```
pub fn segment<P, F>(
    image: &Image<P>,
    edges: Option<&GrayImage>,
    tolerance: f64,
    seed_distance: u32,
    distance: F,
) -> Result<Vec<PixelGroup>>
where
    P: Pixel<Subpixel = u8>,
    F: Fn(&[u8], &[u8]) -> Result<f64>,
{
    if seed_distance == 0 {
        return Err(Error::InvalidParameter {
            name: "seed_distance",
            reason: "must be at least 1".to_owned(),
        });
    }
    if let Some(mask) = edges {
        if mask.dimensions() != image.dimensions() {
            return Err(Error::InvalidParameter {
                name: "edges",
                reason: format!(
                    "mask is {:?} but the image is {:?}",
                    mask.dimensions(),
                    image.dimensions()
                ),
            });
        }
    }

    let (width, height) = image.dimensions();
    let is_edge = |p: Point<u32>| edges.map_or(false, |mask| mask.get_pixel(p.x, p.y)[0] == ON);
    let mut visited = vec![false; (width as usize) * (height as usize)];
    let index = |p: Point<u32>| (p.y as usize) * (width as usize) + p.x as usize;

    let mut groups = vec![];
    let mut queue = VecDeque::new();

    for x in (SEED_MARGIN..width.saturating_sub(SEED_MARGIN)).step_by(seed_distance as usize) {
        for y in (SEED_MARGIN..height.saturating_sub(SEED_MARGIN)).step_by(seed_distance as usize) {
            let mut group = PixelGroup::new(width, height);
            let seed = Point::new(x, y);

            if !visited[index(seed)] && !is_edge(seed) {
                visited[index(seed)] = true;
                queue.push_back(seed);
            }

            while let Some(p) = queue.pop_front() {
                group.insert(p);
                let current = image.get_pixel(p.x, p.y).channels();

                for offset in &EIGHT_NEIGHBOURS {
                    let n = match (p.to_i64() + *offset).in_bounds(width, height) {
                        Some(n) => n,
                        None => continue,
                    };
                    if visited[index(n)] || is_edge(n) {
                        continue;
                    }
                    if distance(image.get_pixel(n.x, n.y).channels(), current)? < tolerance {
                        visited[index(n)] = true;
                        queue.push_back(n);
                    }
                }
            }

            groups.push(group);
        }
    }

    debug!(
        "grew {} regions from seeds {} pixels apart",
        groups.len(),
        seed_distance
    );
    Ok(groups)
}
