use crate::definitions::{Image, OFF, ON};
use image::{GrayImage, Pixel};
use proptest::{
    arbitrary::{any, Arbitrary},
    sample::SizeRange,
    strategy::{BoxedStrategy, Just, Strategy},
};
use std::{fmt, ops::RangeInclusive};

/// Create a strategy to generate images with arbitrary dimensions selected
/// within the specified ranges.
pub(crate) fn arbitrary_image<P>(
    width_range: impl Into<SizeRange>,
    height_range: impl Into<SizeRange>,
) -> BoxedStrategy<Image<P>>
where
    P: Pixel + fmt::Debug,
    P::Subpixel: Arbitrary,
    <P::Subpixel as Arbitrary>::Strategy: 'static,
{
    dims(width_range, height_range)
        .prop_flat_map(|(w, h)| {
            let size = (w * h * P::CHANNEL_COUNT as u32) as usize;
            proptest::collection::vec(any::<P::Subpixel>(), size)
                .prop_map(move |v| Image::from_vec(w, h, v).unwrap())
        })
        .boxed()
}

/// Create a strategy to generate binary images, every pixel `ON` or `OFF`,
/// with arbitrary dimensions selected within the specified ranges.
pub(crate) fn arbitrary_binary_image(
    width_range: impl Into<SizeRange>,
    height_range: impl Into<SizeRange>,
) -> BoxedStrategy<GrayImage> {
    dims(width_range, height_range)
        .prop_flat_map(|(w, h)| {
            let pixel = proptest::prop_oneof![Just(ON), Just(OFF)];
            proptest::collection::vec(pixel, (w * h) as usize)
                .prop_map(move |v| GrayImage::from_vec(w, h, v).unwrap())
        })
        .boxed()
}

fn dims(width: impl Into<SizeRange>, height: impl Into<SizeRange>) -> BoxedStrategy<(u32, u32)> {
    let width = dim(width);
    let height = dim(height);
    width
        .prop_flat_map(move |w| height.clone().prop_map(move |h| (w, h)))
        .boxed()
}

fn dim(range: impl Into<SizeRange>) -> RangeInclusive<u32> {
    let range = range.into();
    range.start() as u32..=range.end_incl() as u32
}

#[cfg(not(miri))]
#[cfg(test)]
mod proptests {
    use super::*;
    use image::Rgb;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_arbitrary_fixed_rgb(img in arbitrary_image::<Rgb<u8>>(3, 7)) {
            assert_eq!(img.width(), 3);
            assert_eq!(img.height(), 7);
        }

        #[test]
        fn test_arbitrary_binary(img in arbitrary_binary_image(1..30, 2..=40)) {
            assert!((1..30).contains(&img.width()));
            assert!((2..=40).contains(&img.height()));
            assert!(img.pixels().all(|p| p[0] == ON || p[0] == OFF));
        }
    }
}
