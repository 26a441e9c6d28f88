//! Binary morphology, grouping and edge detection for extracting road-like
//! structures from raster imagery, based on the [image] crate.
//!
//! Binary images are [`GrayImage`](image::GrayImage)s holding only
//! [`ON`](definitions::ON) and [`OFF`](definitions::OFF). The typical flow is
//! raster image → edge map ([`edges`]) → binary mask → cleanup
//! ([`morphology`], [`binary`]) → groups of pixels ([`region_labelling`],
//! [`segmentation`]).
//!
//! Every morphological operator is built on the hit-and-miss transform in
//! [`hit_and_miss`], which comes in a dense form, a sparse form restricted to
//! an active set of pixels, and a form over a [`PixelGroup`](pixel_group::PixelGroup).
//!
//! [image]: https://github.com/image-rs/image
#![deny(missing_docs)]
#![allow(
    clippy::cast_lossless,
    clippy::needless_range_loop,
    clippy::needless_doctest_main,
    clippy::range_plus_one,
    clippy::trivially_copy_pass_by_ref,
    clippy::many_single_char_names
)]

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

#[macro_use]
pub mod utils;
pub mod binary;
pub mod definitions;
pub mod distance_transform;
pub mod edges;
pub mod error;
pub mod filter;
pub mod gradients;
pub mod hit_and_miss;
pub mod kernel;
pub mod morphology;
pub mod pixel_group;
pub mod point;
#[cfg(test)]
mod proptest_utils;
pub mod region_labelling;
pub mod segmentation;
pub mod structuring_element;
