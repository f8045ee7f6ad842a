use imgconv_image::ImageSize;

use crate::bmp::BmpError;

/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to read or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode or encode the BMP image.
    #[error("Error with Bmp encoding/decoding. {0}")]
    BmpError(#[from] BmpError),

    /// Error to decode the JPEG image.
    #[error("Error with Jpeg decoding. {0}")]
    JpegDecodingError(#[from] zune_jpeg::errors::DecodeErrors),

    /// Error to encode the JPEG image.
    #[error("Error with Jpeg encoding. {0}")]
    JpegEncodingError(#[from] jpeg_encoder::EncodingError),

    /// The image size cannot be represented by the target format.
    #[error("Unsupported image size for this format: {0}")]
    UnsupportedImageSize(ImageSize),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] imgconv_image::ImageError),

    /// Error to decode or encode the image with the image crate.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),
}

impl IoError {
    /// Whether the error is caused by the image data or its file name rather
    /// than by the environment (missing file, permissions, full disk, ...).
    pub fn is_format_error(&self) -> bool {
        match self {
            IoError::FileDoesNotExist(_) | IoError::FileError(_) => false,
            IoError::ImageDecodeError(image::ImageError::IoError(_)) => false,
            IoError::JpegEncodingError(jpeg_encoder::EncodingError::IoError(_)) => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_errors_are_not_format_errors() {
        let not_found = || std::io::Error::from(std::io::ErrorKind::NotFound);

        assert!(!IoError::FileError(not_found()).is_format_error());
        assert!(!IoError::FileDoesNotExist("a.bmp".into()).is_format_error());
        assert!(!IoError::JpegEncodingError(jpeg_encoder::EncodingError::IoError(not_found()))
            .is_format_error());
        assert!(!IoError::ImageDecodeError(image::ImageError::IoError(not_found()))
            .is_format_error());
    }

    #[test]
    fn data_errors_are_format_errors() {
        assert!(IoError::BmpError(BmpError::InvalidMagic(*b"XX")).is_format_error());
        assert!(IoError::InvalidFileExtension("a.gif".into()).is_format_error());
        assert!(IoError::UnsupportedImageSize(ImageSize::from([0, 0])).is_format_error());
    }
}
