use std::{fmt, path::Path};

use imgconv_image::Image;

use crate::{bmp, error::IoError, jpeg, ppm};

/// The on-disk image formats supported by the converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// 24-bit uncompressed Windows bitmap.
    Bmp,
    /// JPEG / JFIF.
    Jpeg,
    /// Netpbm pixmap.
    Ppm,
}

impl ImageFormat {
    /// Guess the format from the extension of a file path.
    ///
    /// The comparison is case insensitive. Returns `None` for unknown or
    /// missing extensions.
    ///
    /// ```
    /// use imgconv_io::functional::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_path("photo.JPG"), Some(ImageFormat::Jpeg));
    /// assert_eq!(ImageFormat::from_path("scan.bmp"), Some(ImageFormat::Bmp));
    /// assert_eq!(ImageFormat::from_path("notes.txt"), None);
    /// ```
    pub fn from_path(file_path: impl AsRef<Path>) -> Option<Self> {
        let ext = file_path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "bmp" => Some(ImageFormat::Bmp),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "ppm" => Some(ImageFormat::Ppm),
            _ => None,
        }
    }

    /// The codec implementing this format.
    pub fn codec(self) -> &'static ImageCodec {
        &CODECS[self as usize]
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Bmp => "BMP",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Ppm => "PPM",
        })
    }
}

/// A pair of functions reading and writing one image format.
pub struct ImageCodec {
    /// The format handled by this codec.
    pub format: ImageFormat,
    /// Read an RGB image from a file.
    pub read: fn(&Path) -> Result<Image<u8, 3>, IoError>,
    /// Write an RGB image to a file.
    pub write: fn(&Path, &Image<u8, 3>) -> Result<(), IoError>,
}

// indexed by `ImageFormat as usize`
static CODECS: [ImageCodec; 3] = [
    ImageCodec {
        format: ImageFormat::Bmp,
        read: read_bmp,
        write: write_bmp,
    },
    ImageCodec {
        format: ImageFormat::Jpeg,
        read: read_jpeg,
        write: write_jpeg,
    },
    ImageCodec {
        format: ImageFormat::Ppm,
        read: read_ppm,
        write: write_ppm,
    },
];

fn read_bmp(file_path: &Path) -> Result<Image<u8, 3>, IoError> {
    bmp::read_image_bmp_rgb8(file_path)
}

fn write_bmp(file_path: &Path, image: &Image<u8, 3>) -> Result<(), IoError> {
    bmp::write_image_bmp_rgb8(file_path, image)
}

fn read_jpeg(file_path: &Path) -> Result<Image<u8, 3>, IoError> {
    jpeg::read_image_jpeg_rgb8(file_path)
}

fn write_jpeg(file_path: &Path, image: &Image<u8, 3>) -> Result<(), IoError> {
    jpeg::write_image_jpeg_rgb8(file_path, image, jpeg::DEFAULT_JPEG_QUALITY)
}

fn read_ppm(file_path: &Path) -> Result<Image<u8, 3>, IoError> {
    ppm::read_image_ppm_rgb8(file_path)
}

fn write_ppm(file_path: &Path, image: &Image<u8, 3>) -> Result<(), IoError> {
    ppm::write_image_ppm_rgb8(file_path, image)
}

fn codec_for(file_path: &Path) -> Result<&'static ImageCodec, IoError> {
    ImageFormat::from_path(file_path)
        .map(ImageFormat::codec)
        .ok_or_else(|| IoError::InvalidFileExtension(file_path.to_path_buf()))
}

/// Reads an RGB image from the given file path.
///
/// The codec is selected from the file extension (`.bmp`, `.jpg`, `.jpeg`,
/// `.ppm`).
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();
    let codec = codec_for(file_path)?;
    log::debug!("reading {} as {}", file_path.display(), codec.format);
    (codec.read)(file_path)
}

/// Writes an RGB image to the given file path.
///
/// The codec is selected from the file extension, like [`read_image_rgb8`].
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `image` - The image to write.
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let codec = codec_for(file_path)?;
    log::debug!("writing {} as {}", file_path.display(), codec.format);
    (codec.write)(file_path, image)
}
