//! Integer convolution kernels with a normalising divisor.

use crate::point::Point;
use itertools::Itertools;

/// A 2D integer kernel, used to filter images via convolution.
///
/// Weighted sums are divided by `divisor` before being written out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Kernel<'a> {
    data: &'a [i32],
    width: u32,
    height: u32,
    divisor: i32,
}

/// Sobel kernel for detecting horizontal gradients: positive where
/// intensity increases to the right.
#[rustfmt::skip]
pub static SOBEL_X: Kernel<'static> = Kernel {
    data: &[-1, 0, 1,
            -2, 0, 2,
            -1, 0, 1],
    width: 3,
    height: 3,
    divisor: 1,
};

/// Sobel kernel for detecting vertical gradients: positive where
/// intensity increases upwards, i.e. towards row 0.
#[rustfmt::skip]
pub static SOBEL_Y: Kernel<'static> = Kernel {
    data: &[ 1,  2,  1,
             0,  0,  0,
            -1, -2, -1],
    width: 3,
    height: 3,
    divisor: 1,
};

/// 5x5 Gaussian smoothing kernel (sigma of roughly 1.4) used ahead of Canny edge detection.
#[rustfmt::skip]
pub static GAUSSIAN_5X5: Kernel<'static> = Kernel {
    data: &[2,  4,  5,  4, 2,
            4,  9, 12,  9, 4,
            5, 12, 15, 12, 5,
            4,  9, 12,  9, 4,
            2,  4,  5,  4, 2],
    width: 5,
    height: 5,
    divisor: 159,
};

impl<'a> Kernel<'a> {
    /// Construct a kernel from a slice in row-major form, its dimensions and a divisor.
    ///
    /// # Panics
    ///
    /// If either dimension is zero, the slice length doesn't match, or `divisor == 0`.
    pub fn new(data: &'a [i32], width: u32, height: u32, divisor: i32) -> Kernel<'a> {
        assert!(width > 0 && height > 0, "width and height must be non-zero");
        assert!(
            width as usize * height as usize == data.len(),
            "Invalid kernel len: expecting {}, found {}",
            width * height,
            data.len()
        );
        assert!(divisor != 0, "divisor must be non-zero");
        Kernel {
            data,
            width,
            height,
            divisor,
        }
    }

    /// The width of the kernel.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height of the kernel.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The value weighted sums are divided by.
    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    /// The weight at column `x` and row `y`.
    pub fn get(&self, x: u32, y: u32) -> i32 {
        self.data[(y * self.width + x) as usize]
    }

    /// Every weight with its offset from the kernel centre, in row-major order.
    ///
    /// Offsets run over `-floor(k / 2)..ceil(k / 2)` in each direction.
    pub fn taps(&self) -> impl Iterator<Item = (Point<i64>, i32)> + 'a {
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        let data = self.data;
        (0..h)
            .cartesian_product(0..w)
            .map(move |(y, x)| Point::new(x - w / 2, y - h / 2))
            .zip(data.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_weights_sum_to_divisor() {
        let sum: i32 = GAUSSIAN_5X5.taps().map(|(_, w)| w).sum();
        assert_eq!(sum, GAUSSIAN_5X5.divisor());
    }

    #[test]
    fn test_sobel_taps() {
        let taps: Vec<_> = SOBEL_X.taps().collect();
        assert_eq!(taps.len(), 9);
        assert_eq!(taps[0], (Point::new(-1, -1), -1));
        assert_eq!(taps[5], (Point::new(1, 0), 2));
        assert_eq!(SOBEL_Y.get(1, 0), 2);
        assert_eq!(SOBEL_Y.get(1, 2), -2);
    }

    #[test]
    fn test_taps_even_kernel() {
        let data = [1, 2, 3, 4];
        let kernel = Kernel::new(&data, 2, 2, 1);
        let offsets: Vec<_> = kernel.taps().map(|(p, _)| p).collect();
        assert_eq!(
            offsets,
            vec![
                Point::new(-1, -1),
                Point::new(0, -1),
                Point::new(-1, 0),
                Point::new(0, 0)
            ]
        );
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_zero_divisor() {
        let data = [1];
        Kernel::new(&data, 1, 1, 0);
    }
}
