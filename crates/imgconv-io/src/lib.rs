#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, encoding/decoding failures,
/// and format-specific errors.
pub mod error;

/// 24-bit uncompressed BMP encoding and decoding.
///
/// Bit-exact reader and writer for `BITMAPINFOHEADER` bitmaps.
pub mod bmp;

/// High-level image reading and writing functions.
///
/// Selects the codec from the file extension.
/// See [`functional::read_image_rgb8`].
pub mod functional;

/// JPEG image encoding and decoding.
///
/// Pure Rust JPEG codec for reading and writing JPEG images.
pub mod jpeg;

/// PPM image encoding and decoding.
pub mod ppm;

pub use crate::error::IoError;
pub use crate::functional::{read_image_rgb8, write_image_rgb8, ImageFormat};
