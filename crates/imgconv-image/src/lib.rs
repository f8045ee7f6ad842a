#![deny(missing_docs)]
//! Image types for the imgconv converter

/// image representation for the conversion pipeline.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize, Rgb8};
