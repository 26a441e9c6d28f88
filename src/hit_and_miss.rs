//! The [hit-and-miss transform] on binary images and pixel groups.
//!
//! Every operator in [`morphology`](crate::morphology) is built from one of the
//! three variants here:
//!
//! * [`hit_and_miss`] tests every pixel of an image, in parallel when the
//!   `rayon` feature is enabled.
//! * [`hit_and_miss_active`] tests only the pixels of an active set and drops
//!   matched pixels from that set, for thinning loops that repeatedly shrink
//!   the foreground.
//! * [`hit_and_miss_group`] treats membership of a [`PixelGroup`] as
//!   foreground.
//!
//! [hit-and-miss transform]: https://homepages.inf.ed.ac.uk/rbf/HIPR2/hitmiss.htm

use crate::definitions::ON;
use crate::pixel_group::PixelGroup;
use crate::point::Point;
use crate::structuring_element::StructuringElement;
use image::GrayImage;

/// Returns an image with `hit` at every pixel where `element` matches `image`
/// and `miss` everywhere else.
///
/// The element is centred on each pixel in turn. It matches if every cell that
/// is not `DontCare` equals the image pixel beneath it. Cells that fall outside
/// the image are skipped, so they never prevent a match.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::hit_and_miss::hit_and_miss;
/// use roadproc::structuring_element::{Element::*, StructuringElement};
///
/// // A foreground pixel with background directly above it.
/// let element = StructuringElement::new(vec![Off, On], 1, 2);
///
/// let image = gray_image!(
///       0,   0,   0;
///       0, 255, 255;
///       0, 255,   0);
///
/// let top_edges = gray_image!(
///       0,   0,   0;
///       0, 255, 255;
///       0,   0,   0);
///
/// assert_pixels_eq!(hit_and_miss(&image, &element, 255, 0), top_edges);
/// # }
/// ```
pub fn hit_and_miss(image: &GrayImage, element: &StructuringElement, hit: u8, miss: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let cells = element.active_cells();
    let fill_row = |y: usize, row: &mut [u8]| {
        for (x, p) in row.iter_mut().enumerate() {
            let centre = Point::new(x as i64, y as i64);
            *p = if window_matches(image, &cells, centre) {
                hit
            } else {
                miss
            };
        }
    };

    let raw: &mut [u8] = &mut out;
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        raw.par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        raw.chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    }

    out
}

fn window_matches(image: &GrayImage, cells: &[(Point<i64>, u8)], centre: Point<i64>) -> bool {
    let (width, height) = image.dimensions();
    cells.iter().all(|&(offset, value)| {
        match (centre + offset).in_bounds(width, height) {
            Some(p) => image.get_pixel(p.x, p.y)[0] == value,
            None => true,
        }
    })
}

/// Hit-and-miss transform restricted to the pixels of `active`, for thinning
/// loops.
///
/// Each pixel of `active` whose whole window lies inside the image is tested
/// as in [`hit_and_miss`]. A matched pixel is written as `hit` and removed
/// from the active set; an unmatched one is written as `miss`. A pixel whose
/// window would leave the image is not tested: its current value in `image`
/// is copied to the output and it stays in the set. For a 3x3 element these
/// are exactly the pixels on the image border. Pixels outside `active` are
/// `OFF` in the output.
///
/// Returns the output image together with the shrunk active set.
///
/// Because border pixels are copied rather than tested, removing the `ON`
/// pixels of the output from `image` (as the thinning operators do) clears
/// any foreground on the border. This differs from [`hit_and_miss`], which
/// skips out-of-bounds cells instead.
///
/// # Panics
///
/// If `active` and `image` have different dimensions.
pub fn hit_and_miss_active(
    image: &GrayImage,
    mut active: PixelGroup,
    element: &StructuringElement,
    hit: u8,
    miss: u8,
) -> (GrayImage, PixelGroup) {
    let (width, height) = image.dimensions();
    assert_eq!(
        active.dimensions(),
        (width, height),
        "active set and image must cover the same domain"
    );

    let cells = element.active_cells();
    let (x_range, y_range) = (element.x_range(), element.y_range());
    let (w, h) = (i64::from(width), i64::from(height));

    let mut out = GrayImage::new(width, height);
    let candidates: Vec<Point<u32>> = active.iter().collect();

    for p in candidates {
        let (x, y) = (i64::from(p.x), i64::from(p.y));
        let inside = x + x_range.start >= 0
            && y + y_range.start >= 0
            && x + x_range.end <= w
            && y + y_range.end <= h;

        if !inside {
            out.put_pixel(p.x, p.y, *image.get_pixel(p.x, p.y));
            continue;
        }

        let matched = cells.iter().all(|&(offset, value)| {
            let q = Point::new(x + offset.x, y + offset.y);
            image.get_pixel(q.x as u32, q.y as u32)[0] == value
        });
        if matched {
            out.get_pixel_mut(p.x, p.y)[0] = hit;
            active.remove(p);
        } else {
            out.get_pixel_mut(p.x, p.y)[0] = miss;
        }
    }

    (out, active)
}

/// Hit-and-miss transform over a pixel group, where membership of `group`
/// plays the role of `ON`.
///
/// Candidate pixels are those in the group's bounding box widened by the
/// extent of `element`, clipped to the group's domain. Element cells that fall
/// outside the domain are skipped. A candidate joins the output if it matched
/// and `hit == ON`, or if it did not match and `miss == ON`.
///
/// An empty group gives an empty output.
pub fn hit_and_miss_group(
    group: &PixelGroup,
    element: &StructuringElement,
    hit: u8,
    miss: u8,
) -> PixelGroup {
    let (width, height) = group.dimensions();
    let mut out = PixelGroup::new(width, height);
    let bounds = match group.bounds() {
        Some(b) => b,
        None => return out,
    };

    let cells: Vec<(Point<i64>, bool)> = element
        .active_cells()
        .into_iter()
        .map(|(offset, value)| (offset, value == ON))
        .collect();
    let (x_range, y_range) = (element.x_range(), element.y_range());

    let x_min = i64::from(bounds.min_x) + x_range.start;
    let x_max = i64::from(bounds.max_x) + x_range.end;
    let y_min = i64::from(bounds.min_y) + y_range.start;
    let y_max = i64::from(bounds.max_y) + y_range.end;

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let centre = match Point::new(x, y).in_bounds(width, height) {
                Some(p) => p,
                None => continue,
            };
            let matched = cells.iter().all(|&(offset, on)| {
                let q = Point::new(x, y) + offset;
                match q.in_bounds(width, height) {
                    Some(q) => group.contains(q) == on,
                    None => true,
                }
            });
            let value = if matched { hit } else { miss };
            if value == ON {
                out.insert(centre);
            }
        }
    }

    out
}
