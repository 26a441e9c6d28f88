//! Functions for finding connected groups of pixels, and filters built on them.

use crate::definitions::{OFF, ON};
use crate::pixel_group::{Bounds, PixelGroup};
use crate::point::{distance_sq, Point, EIGHT_NEIGHBOURS, FOUR_NEIGHBOURS};
use image::{GrayImage, Luma};
use log::debug;
use num::integer::Roots;
use std::collections::VecDeque;

/// Determines which neighbors of a pixel we consider
/// to be connected to it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Connectivity {
    /// A pixel is connected to its N, S, E and W neighbors.
    Four,
    /// A pixel is connected to all of its neighbors.
    Eight,
}

impl Connectivity {
    /// Offsets of the neighbours a pixel is connected to.
    pub fn offsets(self) -> &'static [Point<i64>] {
        match self {
            Connectivity::Four => &FOUR_NEIGHBOURS,
            Connectivity::Eight => &EIGHT_NEIGHBOURS,
        }
    }
}

/// Parameters for [`group_pixels`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GroupOptions {
    /// Value of the pixels to group.
    pub search: u8,
    /// Groups with fewer pixels than this are dropped.
    pub min_size: usize,
    /// Which neighbours are connected.
    pub connectivity: Connectivity,
    /// If true, groups that touch the image border are dropped.
    pub ignore_border: bool,
}

impl Default for GroupOptions {
    /// Every eight-connected group of `ON` pixels, whatever its size or position.
    fn default() -> Self {
        GroupOptions {
            search: ON,
            min_size: 0,
            connectivity: Connectivity::Eight,
            ignore_border: false,
        }
    }
}

impl GroupOptions {
    /// Default options, searching for pixels with value `search`.
    pub fn new(search: u8) -> Self {
        GroupOptions {
            search,
            ..Default::default()
        }
    }

    /// Sets the minimum group size.
    pub fn with_min_size(self, min_size: usize) -> Self {
        GroupOptions { min_size, ..self }
    }

    /// Sets the connectivity.
    pub fn with_connectivity(self, connectivity: Connectivity) -> Self {
        GroupOptions {
            connectivity,
            ..self
        }
    }

    /// Sets whether groups touching the image border are dropped.
    pub fn with_ignore_border(self, ignore_border: bool) -> Self {
        GroupOptions {
            ignore_border,
            ..self
        }
    }
}

/// Finds the connected groups of pixels equal to `options.search`.
///
/// Groups are returned in order of their first pixel, scanning columns left to
/// right and each column top to bottom. Every
/// matching pixel belongs to exactly one group before groups are filtered by
/// `options.min_size` and `options.ignore_border`.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::point::Point;
/// use roadproc::region_labelling::{group_pixels, Connectivity, GroupOptions};
///
/// let image = gray_image!(
///     255,   0,   0,   0;
///       0, 255,   0,   0;
///       0,   0,   0, 255;
///       0,   0,   0, 255);
///
/// // The two pixels in the top left touch only diagonally.
/// let options = GroupOptions::default().with_connectivity(Connectivity::Four);
/// let groups = group_pixels(&image, &options);
/// assert_eq!(groups.len(), 3);
/// assert!(groups[0].contains(Point::new(0, 0)));
/// assert!(groups[1].contains(Point::new(1, 1)));
/// assert_eq!(groups[2].len(), 2);
///
/// let groups = group_pixels(&image, &GroupOptions::default());
/// assert_eq!(groups.len(), 2);
///
/// // Drop everything on the image border.
/// let options = GroupOptions::default().with_ignore_border(true);
/// assert!(group_pixels(&image, &options).is_empty());
/// # }
/// ```
pub fn group_pixels(image: &GrayImage, options: &GroupOptions) -> Vec<PixelGroup> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return vec![];
    }
    let region = Bounds {
        min_x: 0,
        min_y: 0,
        max_x: width - 1,
        max_y: height - 1,
    };
    let search = options.search;
    flood_groups(
        (width, height),
        region,
        |p| image.get_pixel(p.x, p.y)[0] == search,
        options.connectivity,
        options.min_size,
        options.ignore_border,
    )
}

/// Finds the connected groups of pixels within the bounding box of `group`
/// that are members of it (`search == ON`) or not (any other `search`).
///
/// Only the bounding box is scanned. A group that would extend past the
/// bounding box is dropped, so with `search == OFF` this finds the holes
/// enclosed by `group`. Groups are returned in the same column-by-column order
/// as [`group_pixels`].
pub fn group_pixels_in(
    group: &PixelGroup,
    search: u8,
    min_size: usize,
    connectivity: Connectivity,
) -> Vec<PixelGroup> {
    let region = match group.bounds() {
        Some(b) => b,
        None => return vec![],
    };
    let member = search == ON;
    flood_groups(
        group.dimensions(),
        region,
        |p| group.contains(p) == member,
        connectivity,
        min_size,
        true,
    )
}

// Breadth-first flood fill of every matching pixel in `region`. A group is
// cancelled if `cancel_outside` is set and it has a neighbour outside `region`.
// The fill still runs to completion so that no pixel seeds a second group.
fn flood_groups<F>(
    (width, height): (u32, u32),
    region: Bounds,
    matches: F,
    connectivity: Connectivity,
    min_size: usize,
    cancel_outside: bool,
) -> Vec<PixelGroup>
where
    F: Fn(Point<u32>) -> bool,
{
    let index = |p: Point<u32>| p.y as usize * width as usize + p.x as usize;
    let mut visited = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::new();
    let mut groups = vec![];
    let mut dropped = 0;

    for x in region.min_x..=region.max_x {
        for y in region.min_y..=region.max_y {
            let seed = Point::new(x, y);
            if visited[index(seed)] || !matches(seed) {
                continue;
            }

            let mut group = PixelGroup::new(width, height);
            let mut cancel = false;
            visited[index(seed)] = true;
            queue.push_back(seed);

            while let Some(p) = queue.pop_front() {
                group.insert(p);
                for offset in connectivity.offsets() {
                    let n = p.to_i64() + *offset;
                    if !region.contains(n.x, n.y) {
                        cancel |= cancel_outside;
                        continue;
                    }
                    let n = Point::new(n.x as u32, n.y as u32);
                    if !visited[index(n)] && matches(n) {
                        visited[index(n)] = true;
                        queue.push_back(n);
                    }
                }
            }

            if cancel || group.len() < min_size {
                dropped += 1;
            } else {
                groups.push(group);
            }
        }
    }

    debug!("found {} groups, dropped {}", groups.len(), dropped);
    groups
}

/// Relabels every group of `search` pixels that does not touch the image
/// border: to `miss` if it has fewer than `k` pixels, and to `hit` otherwise.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::region_labelling::{group_pixels_test, Connectivity};
///
/// let image = gray_image!(
///     0,   0,   0,   0,   0,   0;
///     0, 255,   0, 255, 255,   0;
///     0,   0,   0, 255, 255,   0;
///     0,   0,   0,   0,   0,   0);
///
/// // Mark small groups with 50 and large ones with 200.
/// let labelled = gray_image!(
///     0,  0, 0,   0,   0, 0;
///     0, 50, 0, 200, 200, 0;
///     0,  0, 0, 200, 200, 0;
///     0,  0, 0,   0,   0, 0);
///
/// assert_pixels_eq!(
///     group_pixels_test(&image, 255, 200, 50, 2, Connectivity::Eight),
///     labelled);
/// # }
/// ```
pub fn group_pixels_test(
    image: &GrayImage,
    search: u8,
    hit: u8,
    miss: u8,
    k: usize,
    connectivity: Connectivity,
) -> GrayImage {
    let mut out = image.clone();
    group_pixels_test_mut(&mut out, search, hit, miss, k, connectivity);
    out
}

/// An in-place version of [`group_pixels_test`].
pub fn group_pixels_test_mut(
    image: &mut GrayImage,
    search: u8,
    hit: u8,
    miss: u8,
    k: usize,
    connectivity: Connectivity,
) {
    let options = GroupOptions::new(search)
        .with_min_size(1)
        .with_connectivity(connectivity)
        .with_ignore_border(true);
    for group in group_pixels(image, &options) {
        let value = if group.len() < k { miss } else { hit };
        for p in &group {
            image.put_pixel(p.x, p.y, Luma([value]));
        }
    }
}

/// Removes eight-connected groups of foreground with fewer than `min_size`
/// pixels. Groups touching the border are kept.
pub fn group_open(image: &GrayImage, min_size: usize) -> GrayImage {
    group_pixels_test(image, ON, ON, OFF, min_size, Connectivity::Eight)
}

/// Fills eight-connected holes in the foreground with fewer than `min_size`
/// pixels. Holes touching the border are kept.
pub fn group_close(image: &GrayImage, min_size: usize) -> GrayImage {
    group_pixels_test(image, OFF, OFF, ON, min_size, Connectivity::Eight)
}

/// Fills the eight-connected holes enclosed by `group` that have fewer than
/// `min_size` pixels. Background regions reaching the edge of the group's
/// bounding box are not holes and are left alone.
pub fn group_close_pixel_group(group: &PixelGroup, min_size: usize) -> PixelGroup {
    let mut out = group.clone();
    for hole in group_pixels_in(group, OFF, 1, Connectivity::Eight) {
        if hole.len() < min_size {
            out.extend(hole.iter());
        }
    }
    out
}

/// Collapses each eight-connected group of foreground to a single pixel.
///
/// The representative is the centre of the group's bounding box if that pixel
/// is in the group. Otherwise it is the group's pixel nearest to the centre,
/// measured in whole pixels, with ties going to the first in row-major order.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate roadproc;
/// # fn main() {
/// use roadproc::region_labelling::cluster_points;
///
/// let image = gray_image!(
///     255, 255, 255, 0,   0;
///     255, 255, 255, 0,   0;
///     255, 255, 255, 0, 255);
///
/// let clustered = gray_image!(
///     0,   0, 0, 0,   0;
///     0, 255, 0, 0,   0;
///     0,   0, 0, 0, 255);
///
/// assert_pixels_eq!(cluster_points(&image), clustered);
/// # }
/// ```
pub fn cluster_points(image: &GrayImage) -> GrayImage {
    let options = GroupOptions::default().with_min_size(1);
    let mut out = GrayImage::new(image.width(), image.height());
    for group in group_pixels(image, &options) {
        if let Some(p) = representative(&group) {
            out.put_pixel(p.x, p.y, Luma([ON]));
        }
    }
    out
}

fn representative(group: &PixelGroup) -> Option<Point<u32>> {
    let b = group.bounds()?;
    let centre = Point::new((b.min_x + b.max_x) / 2, (b.min_y + b.max_y) / 2);
    if group.contains(centre) {
        return Some(centre);
    }
    let c = centre.to_i64();
    group
        .iter()
        .min_by_key(|p| (distance_sq(p.to_i64(), c).sqrt(), p.y, p.x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_pixels_empty_image() {
        let image = GrayImage::new(0, 0);
        assert!(group_pixels(&image, &GroupOptions::default()).is_empty());
    }

    #[test]
    fn test_group_pixels_order_is_column_by_column() {
        let image = gray_image!(
            0,   0, 255;
            0,   0,   0;
            255, 0,   0);
        let groups = group_pixels(&image, &GroupOptions::default());
        assert_eq!(groups.len(), 2);
        assert!(groups[0].contains(Point::new(0, 2)));
        assert!(groups[1].contains(Point::new(2, 0)));
    }

    #[test]
    fn test_group_pixels_min_size() {
        let image = gray_image!(
            255, 0, 255;
            255, 0,   0;
            255, 0,   0);
        let options = GroupOptions::default().with_min_size(2);
        let groups = group_pixels(&image, &options);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_group_pixels_background() {
        let image = gray_image!(
            255, 255, 255, 255;
            255,   0,   0, 255;
            255, 255, 255, 255);
        let options = GroupOptions::new(OFF).with_ignore_border(true);
        let groups = group_pixels(&image, &options);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_group_pixels_border_cancellation_drops_whole_group() {
        let image = gray_image!(
            0,   0,   0,   0, 0;
            0, 255, 255, 255, 255;
            0, 255,   0,   0, 0;
            0,   0,   0,   0, 0);
        let options = GroupOptions::default().with_ignore_border(true);
        assert!(group_pixels(&image, &options).is_empty());
        assert_eq!(group_pixels(&image, &GroupOptions::default())[0].len(), 5);
    }

    #[test]
    fn test_group_pixels_bounds() {
        let image = gray_image!(
            0,   0,   0, 0;
            0,   0, 255, 0;
            0, 255,   0, 0;
            0,   0,   0, 0);
        let groups = group_pixels(&image, &GroupOptions::default());
        assert_eq!(
            groups[0].bounds(),
            Some(Bounds {
                min_x: 1,
                min_y: 1,
                max_x: 2,
                max_y: 2
            })
        );
    }

    #[test]
    fn test_group_open_removes_small_interior_groups() {
        let image = gray_image!(
            255, 0,   0,   0,   0, 0;
            0,   0, 255,   0,   0, 0;
            0,   0,   0,   0, 255, 0;
            0,   0,   0,   0, 255, 0;
            0,   0,   0,   0,   0, 0);
        let expected = gray_image!(
            255, 0, 0, 0,   0, 0;
            0,   0, 0, 0,   0, 0;
            0,   0, 0, 0, 255, 0;
            0,   0, 0, 0, 255, 0;
            0,   0, 0, 0,   0, 0);
        assert_pixels_eq!(group_open(&image, 2), expected);
    }

    #[test]
    fn test_group_close_fills_small_holes() {
        let image = gray_image!(
            255, 255, 255, 255, 255, 255, 255;
            255,   0, 255,   0,   0,   0, 255;
            255, 255, 255, 255, 255, 255, 255;
              0, 255, 255, 255, 255, 255, 255);
        let expected = gray_image!(
            255, 255, 255, 255, 255, 255, 255;
            255, 255, 255,   0,   0,   0, 255;
            255, 255, 255, 255, 255, 255, 255;
              0, 255, 255, 255, 255, 255, 255);
        assert_pixels_eq!(group_close(&image, 3), expected);
    }

    #[test]
    fn test_group_pixels_in_finds_holes() {
        let image = gray_image!(
            0,   0,   0,   0,   0, 0;
            0, 255, 255, 255, 255, 0;
            0, 255,   0, 255,   0, 0;
            0, 255, 255, 255, 255, 0;
            0,   0,   0,   0,   0, 0);
        let group = PixelGroup::from_image(&image, ON);
        let holes = group_pixels_in(&group, OFF, 1, Connectivity::Eight);
        // The gap at (4, 2) reaches the edge of the bounding box.
        assert_eq!(holes.len(), 1);
        assert!(holes[0].contains(Point::new(2, 2)));

        let members = group_pixels_in(&group, ON, 0, Connectivity::Four);
        assert!(members.is_empty());
    }

    #[test]
    fn test_group_pixels_in_interior_members() {
        let mut group = PixelGroup::new(8, 8);
        group.insert(Point::new(1, 1));
        group.insert(Point::new(5, 5));
        group.insert(Point::new(3, 3));
        group.insert(Point::new(3, 4));
        let groups = group_pixels_in(&group, ON, 1, Connectivity::Four);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_group_close_pixel_group() {
        let image = gray_image!(
            255, 255, 255, 255, 255, 255;
            255,   0, 255,   0,   0, 255;
            255, 255, 255, 255, 255, 255);
        let group = PixelGroup::from_image(&image, ON);

        let closed = group_close_pixel_group(&group, 2);
        assert!(closed.contains(Point::new(1, 1)));
        assert!(!closed.contains(Point::new(3, 1)));
        assert_eq!(closed.len(), group.len() + 1);

        let closed = group_close_pixel_group(&group, 3);
        assert_eq!(closed.len(), 18);
    }

    #[test]
    fn test_cluster_points_uses_nearest_member() {
        // An L whose bounding box centre (1, 1) is background.
        let image = gray_image!(
            255, 0,   0;
            255, 0,   0;
            255, 255, 255);
        let clustered = cluster_points(&image);
        let on: Vec<_> = clustered
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] == ON)
            .map(|(x, y, _)| (x, y))
            .collect();
        // Every member is within one whole pixel of the centre, so the first
        // in row-major order wins.
        assert_eq!(on, vec![(0, 0)]);
    }
}
