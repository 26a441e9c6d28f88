//! Ternary structuring elements used by the [hit-and-miss transform] and the
//! operators built on it.
//!
//! [hit-and-miss transform]: https://homepages.inf.ed.ac.uk/rbf/HIPR2/hitmiss.htm

use crate::definitions::{DONT_CARE, OFF, ON};
use crate::point::Point;
use std::ops::Range;

/// A cell of a structuring element.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    /// The image pixel under this cell must be foreground.
    On,
    /// The image pixel under this cell must be background.
    Off,
    /// The image pixel under this cell is ignored.
    DontCare,
}

impl Element {
    /// The raw pixel value for this cell.
    pub fn value(self) -> u8 {
        match self {
            Element::On => ON,
            Element::Off => OFF,
            Element::DontCare => DONT_CARE,
        }
    }
}

const I: Element = Element::On;
const O: Element = Element::Off;
const X: Element = Element::DontCare;

/// An end-point detector. Used with [`PRUNE_SIDE`] by
/// [`prune`](crate::morphology::prune).
#[rustfmt::skip]
pub const PRUNE_END: [Element; 9] = [
    O, O, O,
    O, I, X,
    O, O, X,
];

/// Second pruning element, the mirror image of [`PRUNE_END`] about the horizontal axis.
#[rustfmt::skip]
pub const PRUNE_SIDE: [Element; 9] = [
    O, O, X,
    O, I, X,
    O, O, O,
];

/// Edge-thinning element used by [`skeletonize`](crate::morphology::skeletonize).
#[rustfmt::skip]
pub const SKELETON_EDGE: [Element; 9] = [
    O, X, I,
    O, I, I,
    O, X, I,
];

/// Corner-thinning element used by [`skeletonize`](crate::morphology::skeletonize).
#[rustfmt::skip]
pub const SKELETON_CORNER: [Element; 9] = [
    O, O, X,
    O, I, I,
    X, I, X,
];

/// Isolated line segments in each of the four principal orientations,
/// removed in turn by [`salient_points`](crate::morphology::salient_points).
#[rustfmt::skip]
pub const SALIENT_LINES: [[Element; 9]; 4] = [
    [O, O, O,
     I, I, I,
     O, O, O],
    [O, I, O,
     O, I, O,
     O, I, O],
    [I, O, O,
     O, I, O,
     O, O, I],
    [O, O, I,
     O, I, O,
     I, O, O],
];

/// The four corner templates matched by [`corners`](crate::morphology::corners).
#[rustfmt::skip]
pub const CORNERS: [[Element; 9]; 4] = [
    [X, I, X,
     O, I, I,
     O, O, X],
    [X, I, X,
     I, I, O,
     X, O, O],
    [X, O, O,
     I, I, O,
     X, I, X],
    [O, O, X,
     O, I, I,
     X, I, X],
];

/// A rectangular template of [`Element`]s, centred on the pixel being tested.
///
/// For a side of length `k` the template covers offsets
/// `-floor(k / 2)..ceil(k / 2)`, so even sizes are accepted and extend
/// one pixel further up and to the left than down and to the right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuringElement {
    data: Vec<Element>,
    width: u32,
    height: u32,
}

impl StructuringElement {
    /// Construct an element from row-major data and its dimensions.
    ///
    /// # Panics
    ///
    /// If either dimension is zero or `data.len() != width * height`.
    pub fn new(data: Vec<Element>, width: u32, height: u32) -> StructuringElement {
        assert!(width > 0 && height > 0, "width and height must be non-zero");
        assert!(
            width as usize * height as usize == data.len(),
            "Invalid element len: expecting {}, found {}",
            width * height,
            data.len()
        );
        StructuringElement {
            data,
            width,
            height,
        }
    }

    /// Construct a 3x3 element from a row-major table such as [`SKELETON_EDGE`].
    pub fn from_3x3(cells: &[Element; 9]) -> StructuringElement {
        Self::new(cells.to_vec(), 3, 3)
    }

    /// A `size * size` element with every cell set to `value`.
    ///
    /// # Examples
    /// ```
    /// use roadproc::structuring_element::{Element, StructuringElement};
    ///
    /// let square = StructuringElement::square(3, Element::On);
    /// assert_eq!(square.width(), 3);
    /// assert!(square.cells().all(|(_, e)| e == Element::On));
    /// ```
    pub fn square(size: u32, value: Element) -> StructuringElement {
        Self::new(vec![value; (size * size) as usize], size, size)
    }

    /// Width of the element.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the element.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The cell at column `x` and row `y`.
    pub fn get(&self, x: u32, y: u32) -> Element {
        self.data[(y * self.width + x) as usize]
    }

    /// Horizontal offsets covered by the element, relative to its centre.
    pub fn x_range(&self) -> Range<i64> {
        centred_range(self.width)
    }

    /// Vertical offsets covered by the element, relative to its centre.
    pub fn y_range(&self) -> Range<i64> {
        centred_range(self.height)
    }

    /// Every cell with its offset from the centre, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Point<i64>, Element)> + '_ {
        let (x_start, y_start) = (self.x_range().start, self.y_range().start);
        self.data.iter().enumerate().map(move |(i, &e)| {
            let x = (i as u32 % self.width) as i64 + x_start;
            let y = (i as u32 / self.width) as i64 + y_start;
            (Point::new(x, y), e)
        })
    }

    /// The offset and required raw pixel value of every cell that is not `DontCare`.
    pub(crate) fn active_cells(&self) -> Vec<(Point<i64>, u8)> {
        self.cells()
            .filter(|&(_, e)| e != Element::DontCare)
            .map(|(p, e)| (p, e.value()))
            .collect()
    }

    /// Rotates the element 90 degrees counter-clockwise.
    ///
    /// The returned element has the width and height of `self` swapped.
    ///
    /// # Examples
    /// ```
    /// use roadproc::structuring_element::{Element::*, StructuringElement};
    ///
    /// let element = StructuringElement::new(vec![
    ///     On, Off, Off,
    ///     On, Off, Off,
    /// ], 3, 2);
    ///
    /// let rotated = StructuringElement::new(vec![
    ///     Off, Off,
    ///     Off, Off,
    ///     On,  On,
    /// ], 2, 3);
    ///
    /// assert_eq!(element.rotate_left(), rotated);
    /// ```
    pub fn rotate_left(&self) -> StructuringElement {
        let (width, height) = (self.height, self.width);
        let mut data = vec![Element::DontCare; self.data.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let (rx, ry) = (y, self.width - x - 1);
                data[(ry * width + rx) as usize] = self.get(x, y);
            }
        }
        Self::new(data, width, height)
    }

    /// Rotates the element 90 degrees clockwise. The inverse of [`rotate_left`](Self::rotate_left).
    pub fn rotate_right(&self) -> StructuringElement {
        let (width, height) = (self.height, self.width);
        let mut data = vec![Element::DontCare; self.data.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let (rx, ry) = (self.height - y - 1, x);
                data[(ry * width + rx) as usize] = self.get(x, y);
            }
        }
        Self::new(data, width, height)
    }

    /// The element followed by its successive counter-clockwise rotations
    /// through 90, 180 and 270 degrees.
    pub fn rotations(&self) -> [StructuringElement; 4] {
        let quarter = self.rotate_left();
        let half = quarter.rotate_left();
        let three_quarters = half.rotate_left();
        [self.clone(), quarter, half, three_quarters]
    }
}

fn centred_range(size: u32) -> Range<i64> {
    let size = i64::from(size);
    -(size / 2)..(size + 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_range() {
        assert_eq!(centred_range(1), 0..1);
        assert_eq!(centred_range(3), -1..2);
        assert_eq!(centred_range(4), -2..2);
        assert_eq!(centred_range(5), -2..3);
    }

    #[test]
    fn test_rotate_left_3x3() {
        let rotated = StructuringElement::from_3x3(&SKELETON_EDGE).rotate_left();
        #[rustfmt::skip]
        let expected = StructuringElement::from_3x3(&[
            I, I, I,
            X, I, X,
            O, O, O,
        ]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_rotate_right_3x3() {
        let rotated = StructuringElement::from_3x3(&SKELETON_EDGE).rotate_right();
        #[rustfmt::skip]
        let expected = StructuringElement::from_3x3(&[
            O, O, O,
            X, I, X,
            I, I, I,
        ]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_prune_side_mirrors_prune_end() {
        let end = StructuringElement::from_3x3(&PRUNE_END);
        let side = StructuringElement::from_3x3(&PRUNE_SIDE);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(end.get(x, y), side.get(x, 2 - y));
            }
        }
    }

    #[test]
    fn test_four_rotations_is_identity() {
        let tables = [PRUNE_END, PRUNE_SIDE, SKELETON_EDGE, SKELETON_CORNER];
        for table in tables.iter().chain(CORNERS.iter()) {
            let element = StructuringElement::from_3x3(table);
            let turned = element
                .rotate_left()
                .rotate_left()
                .rotate_left()
                .rotate_left();
            assert_eq!(turned, element);
        }
    }

    #[test]
    fn test_rotate_right_undoes_rotate_left_non_square() {
        let element = StructuringElement::new(vec![I, O, X, O, I, I, X, X], 4, 2);
        assert_eq!(element.rotate_left().rotate_right(), element);
        assert_eq!(element.rotate_right().rotate_left(), element);
        assert_eq!(element.rotate_left().width(), 2);
        assert_eq!(element.rotate_left().height(), 4);
    }

    #[test]
    fn test_corners_are_rotations_of_each_other() {
        let first = StructuringElement::from_3x3(&CORNERS[0]);
        let rotations = first.rotations();
        for corner in CORNERS.iter() {
            let corner = StructuringElement::from_3x3(corner);
            assert!(rotations.contains(&corner));
        }
    }

    #[test]
    fn test_cells_offsets() {
        let element = StructuringElement::from_3x3(&SKELETON_CORNER);
        let cells: Vec<_> = element.cells().collect();
        assert_eq!(cells[0], (Point::new(-1, -1), O));
        assert_eq!(cells[4], (Point::new(0, 0), I));
        assert_eq!(cells[8], (Point::new(1, 1), X));
        assert_eq!(element.active_cells().len(), 6);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_wrong_length() {
        StructuringElement::new(vec![I; 5], 3, 2);
    }
}
