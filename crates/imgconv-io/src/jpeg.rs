use crate::error::IoError;
use imgconv_image::{Image, ImageSize};
use jpeg_encoder::{ColorType, Encoder};
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

/// Quality used when a JPEG is written without an explicit quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Writes the given JPEG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    quality: u8,
) -> Result<(), IoError> {
    let image_size = image.size();
    let (width, height) = jpeg_dimensions(image_size)?;

    // a missing directory is reported as `IoError::FileError`
    let mut writer = BufWriter::new(fs::File::create(file_path)?);
    let encoder = Encoder::new(&mut writer, quality);
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;
    writer.flush()?;
    Ok(())
}

/// Encodes an RGB image to JPEG bytes.
///
/// # Arguments
///
/// - `image` - The image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn encode_image_jpeg_rgb8(image: &Image<u8, 3>, quality: u8) -> Result<Vec<u8>, IoError> {
    let (width, height) = jpeg_dimensions(image.size())?;

    let mut jpeg_data = Vec::new();
    let encoder = Encoder::new(&mut jpeg_data, quality);
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;
    Ok(jpeg_data)
}

fn jpeg_dimensions(size: ImageSize) -> Result<(u16, u16), IoError> {
    if size.width == 0 || size.height == 0 {
        return Err(IoError::UnsupportedImageSize(size));
    }
    let width = u16::try_from(size.width).map_err(|_| IoError::UnsupportedImageSize(size))?;
    let height = u16::try_from(size.height).map_err(|_| IoError::UnsupportedImageSize(size))?;
    Ok((width, height))
}

/// Read a JPEG image with three channels _(rgb8)_.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG file.
///
/// # Returns
///
/// A RGB image with three channels _(rgb8)_.
pub fn read_image_jpeg_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path.extension().map_or(true, |ext| {
        !ext.eq_ignore_ascii_case("jpg") && !ext.eq_ignore_ascii_case("jpeg")
    }) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let jpeg_data = fs::read(file_path)?;
    decode_image_jpeg_rgb8(&jpeg_data)
}

/// Decodes a JPEG image with three channels _(rgb8)_ from raw bytes.
///
/// Grayscale JPEGs are expanded to three equal channels.
///
/// # Arguments
///
/// - `src` - Raw bytes of the jpeg file
pub fn decode_image_jpeg_rgb8(src: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let mut decoder = zune_jpeg::JpegDecoder::new(src);
    decoder.decode_headers()?;

    let image_info = decoder.info().ok_or_else(|| {
        IoError::JpegDecodingError(zune_jpeg::errors::DecodeErrors::Format(String::from(
            "Failed to find image info from its metadata",
        )))
    })?;

    let image_size = ImageSize {
        width: image_info.width as usize,
        height: image_info.height as usize,
    };

    let img_data = decoder.decode()?;
    let num_pixels = image_size.num_pixels();

    let rgb_data = if img_data.len() == num_pixels * 3 {
        img_data
    } else if img_data.len() == num_pixels {
        img_data.iter().flat_map(|&v| [v, v, v]).collect()
    } else {
        return Err(IoError::JpegDecodingError(
            zune_jpeg::errors::DecodeErrors::Format(format!(
                "Unexpected decoded length {} for {}",
                img_data.len(),
                image_size
            )),
        ));
    };

    log::debug!("decoded {} jpeg", image_size);

    Ok(Image::new(image_size, rgb_data)?)
}
