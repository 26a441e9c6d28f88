//! Errors returned by operations whose failure depends on their input data.
//!
//! Mismatched image dimensions are programming errors and panic, as elsewhere
//! in this crate.

use thiserror::Error;

/// Error type for fallible operations in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two pixel vectors being compared have different lengths.
    #[error("pixel vectors must have the same length: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// A pixel vector has fewer channels than the operation needs.
    #[error("operation requires at least {required} channels, found {found}")]
    TooFewChannels {
        /// Minimum number of channels required.
        required: usize,
        /// Number of channels provided.
        found: usize,
    },

    /// A neighbourhood window has an even side length.
    #[error("window size must be odd, got {0}")]
    EvenKernelSize(u32),

    /// A parameter is outside its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An iterative thinning operation hit its pass limit before reaching a fixed point.
    #[error("did not converge after {passes} passes")]
    DidNotConverge {
        /// Number of passes performed.
        passes: usize,
    },
}

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
