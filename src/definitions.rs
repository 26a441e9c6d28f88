//! Trait definitions, type aliases and the raw values stored in binary images.

use image::{ImageBuffer, Luma, Pixel};
use num::{Bounded, NumCast};

/// An `ImageBuffer` containing Pixels of type P with storage `Vec<P::Subpixel>`.
/// Most operations in this library only support inputs of this type.
pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// A grid of signed integers, used for gradient magnitudes and chamfer distances.
pub type DistanceImage = Image<Luma<i32>>;

/// Value of a foreground pixel in a binary image.
pub const ON: u8 = 255;

/// Value of a background pixel in a binary image.
pub const OFF: u8 = 0;

/// Raw value of a "don't care" cell. Only meaningful inside a
/// [`StructuringElement`](crate::structuring_element::StructuringElement),
/// never in an image being transformed.
pub const DONT_CARE: u8 = 100;

/// A type to which we can clamp a value of type T.
/// Implementations are not required to handle NaNs gracefully.
pub trait Clamp<T> {
    /// Clamp `x` to a valid value for this type.
    fn clamp(x: T) -> Self;
}

/// Creates an implementation of Clamp<From> for type To.
macro_rules! implement_clamp {
    ($from:ty, $to:ty) => {
        impl Clamp<$from> for $to {
            fn clamp(x: $from) -> $to {
                clamp_impl(x)
            }
        }
    };
}

implement_clamp!(i64, u8);

/// Clamp a value from a type with larger range to one with
/// a smaller range. Deliberately not exported - should be used
/// via the Clamp trait.
fn clamp_impl<From, To>(x: From) -> To
where
    From: NumCast + PartialOrd,
    To: NumCast + Bounded,
{
    let to_max = <From as NumCast>::from(To::max_value()).unwrap();
    let to_min = <From as NumCast>::from(To::min_value()).unwrap();
    let clamped = if x > to_max {
        to_max
    } else if x < to_min {
        to_min
    } else {
        x
    };
    To::from(clamped).unwrap()
}

#[cfg(test)]
mod tests {
    use super::Clamp;

    #[test]
    fn test_clamp_i64_u8() {
        let t: u8 = Clamp::clamp(-12i64);
        assert_eq!(t, 0);
        let u: u8 = Clamp::clamp(1000i64);
        assert_eq!(u, 255);
        let v: u8 = Clamp::clamp(77i64);
        assert_eq!(v, 77);
    }
}
