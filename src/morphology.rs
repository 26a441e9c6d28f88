//! Binary [morphological operators], each a composition of
//! [hit-and-miss transforms](crate::hit_and_miss).
//!
//! Images are binary: every pixel is [`ON`] or [`OFF`]. Erosion and dilation
//! use a `k * k` square window centred on each pixel, and window cells that
//! fall outside the image are ignored. For odd `k` this makes [`open`] and
//! [`close`] idempotent.
//!
//! The thinning operators [`skeletonize`] and [`prune`] work on an active set
//! of foreground pixels that shrinks as pixels are removed, see
//! [`hit_and_miss_active`]. As a consequence they clear any foreground on the
//! image border.
//!
//! [morphological operators]: https://homepages.inf.ed.ac.uk/rbf/HIPR2/morops.htm

use crate::binary::{difference, remove_matches, union};
use crate::definitions::{OFF, ON};
use crate::error::{Error, Result};
use crate::hit_and_miss::{hit_and_miss, hit_and_miss_active, hit_and_miss_group};
use crate::pixel_group::PixelGroup;
use crate::region_labelling::{group_pixels, GroupOptions};
use crate::structuring_element::{
    Element, StructuringElement, CORNERS, PRUNE_END, PRUNE_SIDE, SALIENT_LINES, SKELETON_CORNER,
    SKELETON_EDGE,
};
use image::GrayImage;
use log::{debug, trace, warn};

/// Number of rounds run by [`prune`], one per orientation of its elements.
pub const PRUNE_ROUNDS: usize = 4;

/// Sets every pixel with a foreground pixel in its `k * k` window to `ON`.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::morphology::dilate;
///
/// let image = gray_image!(
///     255,   0,   0,   0,   0;
///       0,   0,   0,   0,   0;
///       0,   0,   0,   0,   0;
///       0,   0,   0, 255,   0;
///       0,   0,   0,   0,   0);
///
/// let dilated = gray_image!(
///     255, 255,   0,   0,   0;
///     255, 255,   0,   0,   0;
///       0,   0, 255, 255, 255;
///       0,   0, 255, 255, 255;
///       0,   0, 255, 255, 255);
///
/// assert_pixels_eq!(dilate(&image, 3), dilated);
/// # }
/// ```
///
/// # Panics
///
/// If `k == 0`.
pub fn dilate(image: &GrayImage, k: u32) -> GrayImage {
    hit_and_miss(image, &StructuringElement::square(k, Element::Off), OFF, ON)
}

/// Keeps only the foreground pixels whose whole `k * k` window is foreground.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::morphology::erode;
///
/// let image = gray_image!(
///     255, 255, 255,   0;
///     255, 255, 255,   0;
///     255, 255, 255, 255);
///
/// // Window cells outside the image are ignored, so the left edge survives.
/// let eroded = gray_image!(
///     255, 255,   0,   0;
///     255, 255,   0,   0;
///     255, 255,   0,   0);
///
/// assert_pixels_eq!(erode(&image, 3), eroded);
/// # }
/// ```
///
/// # Panics
///
/// If `k == 0`.
pub fn erode(image: &GrayImage, k: u32) -> GrayImage {
    hit_and_miss(image, &StructuringElement::square(k, Element::On), ON, OFF)
}

/// Erosion followed by dilation. Removes foreground features smaller than the window.
pub fn open(image: &GrayImage, k: u32) -> GrayImage {
    dilate(&erode(image, k), k)
}

/// Dilation followed by erosion. Fills background features smaller than the window.
pub fn close(image: &GrayImage, k: u32) -> GrayImage {
    erode(&dilate(image, k), k)
}

/// The foreground pixels removed by a 3x3 erosion: `image - erode(image, 3)`.
pub fn top_hat(image: &GrayImage) -> GrayImage {
    difference(image, &erode(image, 3))
}

/// The background pixels set by a 3x3 dilation: `dilate(image, 3) - image`.
pub fn bottom_hat(image: &GrayImage) -> GrayImage {
    difference(&dilate(image, 3), image)
}

/// Removes every foreground pixel at which `element` matches.
pub fn thin(image: &GrayImage, element: &StructuringElement) -> GrayImage {
    difference(image, &hit_and_miss(image, element, ON, OFF))
}

/// Removes isolated one-pixel-wide line segments in each of the four
/// principal orientations, leaving the points where lines meet or bend.
///
/// The elements of [`SALIENT_LINES`] are applied with [`thin`] once each, in order.
pub fn salient_points(image: &GrayImage) -> GrayImage {
    SALIENT_LINES.iter().fold(image.clone(), |acc, lines| {
        thin(&acc, &StructuringElement::from_3x3(lines))
    })
}

/// Marks the corners of foreground regions: the union of the dense
/// hit-and-miss matches of the four [`CORNERS`] templates.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::morphology::corners;
///
/// let image = gray_image!(
///     0,   0,   0,   0,   0;
///     0, 255, 255, 255,   0;
///     0, 255, 255, 255,   0;
///     0, 255, 255, 255,   0;
///     0,   0,   0,   0,   0);
///
/// let expected = gray_image!(
///     0,   0,   0,   0,   0;
///     0, 255,   0, 255,   0;
///     0,   0,   0,   0,   0;
///     0, 255,   0, 255,   0;
///     0,   0,   0,   0,   0);
///
/// assert_pixels_eq!(corners(&image), expected);
/// # }
/// ```
pub fn corners(image: &GrayImage) -> GrayImage {
    CORNERS
        .iter()
        .map(|corner| hit_and_miss(image, &StructuringElement::from_3x3(corner), ON, OFF))
        .fold(GrayImage::new(image.width(), image.height()), |acc, matches| {
            union(&acc, &matches)
        })
}

/// Returns the morphological skeleton of `image`. See [`skeletonize_mut`].
pub fn skeletonize(image: &GrayImage) -> GrayImage {
    let mut out = image.clone();
    skeletonize_mut(&mut out);
    out
}

/// Thins the foreground of `image` to a skeleton in place.
///
/// Each pass applies the four rotations of [`SKELETON_EDGE`] and
/// [`SKELETON_CORNER`], removing matched pixels after every element. Passes
/// repeat until one removes nothing. Foreground on the image border is cleared.
pub fn skeletonize_mut(image: &mut GrayImage) {
    let elements = skeleton_elements();
    let mut active = foreground(image);
    let mut passes = 0;
    loop {
        passes += 1;
        let (changed, rest) = thinning_pass(image, active, &elements);
        active = rest;
        trace!("skeleton pass {}: {} active pixels", passes, active.len());
        if !changed {
            break;
        }
    }
    debug!("skeleton converged after {} passes", passes);
}

/// [`skeletonize`] with a limit on the number of passes.
///
/// Returns [`Error::DidNotConverge`] if `max_passes` passes all removed pixels,
/// so a fixed point was not reached. A `max_passes` of zero always fails.
pub fn skeletonize_bounded(image: &GrayImage, max_passes: usize) -> Result<GrayImage> {
    let elements = skeleton_elements();
    let mut out = image.clone();
    let mut active = foreground(&out);
    for pass in 1..=max_passes {
        let (changed, rest) = thinning_pass(&mut out, active, &elements);
        active = rest;
        if !changed {
            debug!("skeleton converged after {} passes", pass);
            return Ok(out);
        }
    }
    warn!(
        "skeleton still changing after {} passes, giving up",
        max_passes
    );
    Err(Error::DidNotConverge { passes: max_passes })
}

/// Returns `image` with short spurs removed. See [`prune_mut`].
pub fn prune(image: &GrayImage) -> GrayImage {
    let mut out = image.clone();
    prune_mut(&mut out);
    out
}

/// Removes line end points in place, for exactly [`PRUNE_ROUNDS`] rounds.
///
/// Round `i` applies [`PRUNE_END`] then [`PRUNE_SIDE`], both rotated `i`
/// quarter turns counter-clockwise. Pruning stops after a fixed number of
/// rounds rather than at a fixed point, which would erase every open line.
/// Foreground on the image border is cleared.
pub fn prune_mut(image: &mut GrayImage) {
    let ends = StructuringElement::from_3x3(&PRUNE_END).rotations();
    let sides = StructuringElement::from_3x3(&PRUNE_SIDE).rotations();
    let mut active = foreground(image);
    for (round, (end, side)) in ends.into_iter().zip(sides).enumerate().take(PRUNE_ROUNDS) {
        let (changed, rest) = thinning_pass(image, active, &[end, side]);
        active = rest;
        trace!("prune round {}: changed = {}", round, changed);
    }
    debug!("pruned to {} active pixels", active.len());
}

fn skeleton_elements() -> Vec<StructuringElement> {
    let edges = StructuringElement::from_3x3(&SKELETON_EDGE).rotations();
    let corners = StructuringElement::from_3x3(&SKELETON_CORNER).rotations();
    edges
        .into_iter()
        .zip(corners)
        .flat_map(|(edge, corner)| [edge, corner])
        .collect()
}

// Every foreground pixel, gathered through the grouper.
fn foreground(image: &GrayImage) -> PixelGroup {
    let groups = group_pixels(image, &GroupOptions::default());
    if groups.is_empty() {
        PixelGroup::new(image.width(), image.height())
    } else {
        PixelGroup::union(&groups)
    }
}

// Applies each element in turn, removing its matches from `image` before the
// next is tried. Returns whether anything was removed, and the shrunk set.
fn thinning_pass(
    image: &mut GrayImage,
    mut active: PixelGroup,
    elements: &[StructuringElement],
) -> (bool, PixelGroup) {
    let mut changed = false;
    for element in elements {
        let (matches, rest) = hit_and_miss_active(image, active, element, ON, OFF);
        active = rest;
        changed |= remove_matches(image, &matches);
    }
    (changed, active)
}

/// Group counterpart of [`erode`].
pub fn erode_group(group: &PixelGroup, k: u32) -> PixelGroup {
    hit_and_miss_group(group, &StructuringElement::square(k, Element::On), ON, OFF)
}

/// Group counterpart of [`dilate`].
pub fn dilate_group(group: &PixelGroup, k: u32) -> PixelGroup {
    hit_and_miss_group(group, &StructuringElement::square(k, Element::Off), OFF, ON)
}

/// Group counterpart of [`open`].
pub fn open_group(group: &PixelGroup, k: u32) -> PixelGroup {
    dilate_group(&erode_group(group, k), k)
}

/// Group counterpart of [`close`].
pub fn close_group(group: &PixelGroup, k: u32) -> PixelGroup {
    erode_group(&dilate_group(group, k), k)
}

/// Group counterpart of [`top_hat`].
pub fn top_hat_group(group: &PixelGroup) -> PixelGroup {
    group - &erode_group(group, 3)
}

/// Group counterpart of [`bottom_hat`].
pub fn bottom_hat_group(group: &PixelGroup) -> PixelGroup {
    &dilate_group(group, 3) - group
}
