//! A sparse set of pixels over a fixed image domain, with a bounding box.

use crate::definitions::{OFF, ON};
use crate::point::Point;
use image::{GrayImage, Luma};
use std::collections::hash_set;
use std::collections::HashSet;
use std::ops::{Add, Sub};

/// Inclusive axis-aligned bounds of a set of pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Smallest x-coordinate.
    pub min_x: u32,
    /// Smallest y-coordinate.
    pub min_y: u32,
    /// Largest x-coordinate.
    pub max_x: u32,
    /// Largest y-coordinate.
    pub max_y: u32,
}

impl Bounds {
    fn around(p: Point<u32>) -> Bounds {
        Bounds {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    fn extend(&mut self, p: Point<u32>) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Returns true if `(x, y)` lies inside these bounds.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= i64::from(self.min_x)
            && x <= i64::from(self.max_x)
            && y >= i64::from(self.min_y)
            && y <= i64::from(self.max_y)
    }
}

/// A set of pixel coordinates within a `width * height` image domain.
///
/// Membership tests, insertion and removal are average O(1). The bounding box
/// grows on insertion but is not shrunk on removal, so after removals it may
/// be larger than the tight box around the remaining pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGroup {
    width: u32,
    height: u32,
    pixels: HashSet<Point<u32>>,
    bounds: Option<Bounds>,
}

impl PixelGroup {
    /// An empty group over a `width * height` domain.
    pub fn new(width: u32, height: u32) -> PixelGroup {
        PixelGroup {
            width,
            height,
            pixels: HashSet::new(),
            bounds: None,
        }
    }

    /// The group of all pixels in `image` with the given value.
    pub fn from_image(image: &GrayImage, value: u8) -> PixelGroup {
        let mut group = PixelGroup::new(image.width(), image.height());
        for (x, y, p) in image.enumerate_pixels() {
            if p[0] == value {
                group.insert(Point::new(x, y));
            }
        }
        group
    }

    /// The union of a sequence of groups. The domain is taken from the first
    /// group; an empty sequence gives an empty group over an empty domain.
    ///
    /// # Panics
    ///
    /// If the groups have different domains.
    pub fn union<'a, I>(groups: I) -> PixelGroup
    where
        I: IntoIterator<Item = &'a PixelGroup>,
    {
        let mut groups = groups.into_iter();
        let mut out = match groups.next() {
            Some(first) => first.clone(),
            None => return PixelGroup::new(0, 0),
        };
        for group in groups {
            assert_eq!(
                group.dimensions(),
                out.dimensions(),
                "cannot combine groups over different domains"
            );
            out.extend(group.iter());
        }
        out
    }

    /// Width and height of the domain.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width of the domain.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the domain.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in the group.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns true if the group has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns true if the group contains `p`.
    pub fn contains(&self, p: Point<u32>) -> bool {
        self.pixels.contains(&p)
    }

    /// Adds `p` to the group, returning true if it was not already present.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the domain.
    pub fn insert(&mut self, p: Point<u32>) -> bool {
        assert!(
            p.x < self.width && p.y < self.height,
            "pixel ({}, {}) outside {}x{} domain",
            p.x,
            p.y,
            self.width,
            self.height
        );
        match self.bounds.as_mut() {
            Some(b) => b.extend(p),
            None => self.bounds = Some(Bounds::around(p)),
        }
        self.pixels.insert(p)
    }

    /// Removes `p` from the group, returning true if it was present.
    /// The bounding box is left unchanged.
    pub fn remove(&mut self, p: Point<u32>) -> bool {
        self.pixels.remove(&p)
    }

    /// Bounding box of every pixel ever inserted, or `None` if nothing has been.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Iterates over the pixels of the group, in no particular order.
    pub fn iter(&self) -> Pixels<'_> {
        Pixels {
            inner: self.pixels.iter(),
        }
    }

    /// Renders the group as a binary image over its domain.
    pub fn to_image(&self) -> GrayImage {
        let mut image = GrayImage::from_pixel(self.width, self.height, Luma([OFF]));
        for p in self.iter() {
            image.put_pixel(p.x, p.y, Luma([ON]));
        }
        image
    }
}

impl Extend<Point<u32>> for PixelGroup {
    fn extend<T: IntoIterator<Item = Point<u32>>>(&mut self, iter: T) {
        for p in iter {
            self.insert(p);
        }
    }
}

/// Iterator over the pixels of a [`PixelGroup`].
#[derive(Debug, Clone)]
pub struct Pixels<'a> {
    inner: hash_set::Iter<'a, Point<u32>>,
}

impl<'a> Iterator for Pixels<'a> {
    type Item = Point<u32>;

    fn next(&mut self) -> Option<Point<u32>> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a PixelGroup {
    type Item = Point<u32>;
    type IntoIter = Pixels<'a>;

    fn into_iter(self) -> Pixels<'a> {
        self.iter()
    }
}

impl Add for &PixelGroup {
    type Output = PixelGroup;

    /// Union of two groups over the same domain.
    fn add(self, rhs: &PixelGroup) -> PixelGroup {
        PixelGroup::union([self, rhs])
    }
}

impl Sub for &PixelGroup {
    type Output = PixelGroup;

    /// Pixels of `self` that are not in `rhs`.
    fn sub(self, rhs: &PixelGroup) -> PixelGroup {
        assert_eq!(
            self.dimensions(),
            rhs.dimensions(),
            "cannot combine groups over different domains"
        );
        let mut out = PixelGroup::new(self.width, self.height);
        out.extend(self.iter().filter(|&p| !rhs.contains(p)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(width: u32, height: u32, points: &[(u32, u32)]) -> PixelGroup {
        let mut group = PixelGroup::new(width, height);
        group.extend(points.iter().map(|&(x, y)| Point::new(x, y)));
        group
    }

    #[test]
    fn test_insert_and_bounds() {
        let mut group = PixelGroup::new(10, 10);
        assert_eq!(group.bounds(), None);
        assert!(group.insert(Point::new(4, 5)));
        assert!(!group.insert(Point::new(4, 5)));
        group.insert(Point::new(2, 7));
        assert_eq!(
            group.bounds(),
            Some(Bounds {
                min_x: 2,
                min_y: 5,
                max_x: 4,
                max_y: 7
            })
        );
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_remove_keeps_bounds() {
        let mut group = group_of(10, 10, &[(1, 1), (8, 8)]);
        assert!(group.remove(Point::new(8, 8)));
        assert!(!group.remove(Point::new(8, 8)));
        assert_eq!(group.len(), 1);
        assert_eq!(group.bounds().unwrap().max_x, 8);
    }

    #[test]
    #[should_panic]
    fn test_insert_outside_domain() {
        let mut group = PixelGroup::new(3, 3);
        group.insert(Point::new(3, 0));
    }

    #[test]
    fn test_union_and_difference() {
        let a = group_of(5, 5, &[(0, 0), (1, 1)]);
        let b = group_of(5, 5, &[(1, 1), (2, 2)]);

        let union = &a + &b;
        assert_eq!(union, group_of(5, 5, &[(0, 0), (1, 1), (2, 2)]));

        let diff = &a - &b;
        assert_eq!(diff.len(), 1);
        assert!(diff.contains(Point::new(0, 0)));

        let all = PixelGroup::union(vec![&a, &b, &diff]);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_union_of_nothing_is_empty() {
        let empty: Vec<&PixelGroup> = vec![];
        assert!(PixelGroup::union(empty).is_empty());
    }

    #[test]
    fn test_image_round_trip() {
        let image = gray_image!(
            0, 255, 0;
            255, 0, 0);
        let group = PixelGroup::from_image(&image, 255);
        assert_eq!(group.len(), 2);
        assert!(group.contains(Point::new(1, 0)));
        assert!(group.contains(Point::new(0, 1)));
        assert_pixels_eq!(group.to_image(), image);
    }
}
