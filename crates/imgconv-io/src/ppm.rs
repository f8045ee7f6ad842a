use std::{fs, io::Write, path::Path};

use image::{
    codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding},
    ExtendedColorType, ImageEncoder,
};
use imgconv_image::{Image, ImageSize};

use crate::error::IoError;

/// Read a PPM image with three channels _(rgb8)_.
///
/// # Arguments
///
/// - `file_path` - The path to the PPM file.
///
/// # Returns
///
/// A RGB image with three channels _(rgb8)_.
pub fn read_image_ppm_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("ppm"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let ppm_data = fs::read(file_path)?;
    decode_image_ppm_rgb8(&ppm_data)
}

/// Decodes a PPM image from raw bytes into an RGB image.
///
/// Both the binary (P6) and ASCII (P3) variants are accepted; samples wider
/// than 8 bits are scaled down.
pub fn decode_image_ppm_rgb8(src: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let img = image::load_from_memory_with_format(src, image::ImageFormat::Pnm)?.into_rgb8();

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {} ppm", size);

    Ok(Image::new(size, img.into_raw())?)
}

/// Encodes an RGB image as a binary (P6) PPM with 8-bit samples.
pub fn encode_image_ppm_rgb8(image: &Image<u8, 3>) -> Result<Vec<u8>, IoError> {
    let mut ppm_data = Vec::new();
    encode_ppm_impl(&mut ppm_data, image)?;
    Ok(ppm_data)
}

/// Writes the given image to the given file path as a binary PPM.
///
/// # Arguments
///
/// - `file_path` - The path to the PPM image.
/// - `image` - The image to write.
pub fn write_image_ppm_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    let ppm_data = encode_image_ppm_rgb8(image)?;
    fs::write(file_path, ppm_data)?;
    Ok(())
}

fn encode_ppm_impl<W: Write>(writer: W, image: &Image<u8, 3>) -> Result<(), IoError> {
    let size = image.size();
    if image.is_empty() {
        return Err(IoError::UnsupportedImageSize(size));
    }
    let width = u32::try_from(size.width).map_err(|_| IoError::UnsupportedImageSize(size))?;
    let height = u32::try_from(size.height).map_err(|_| IoError::UnsupportedImageSize(size))?;

    let encoder =
        PnmEncoder::new(writer).with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary));
    encoder.write_image(image.as_slice(), width, height, ExtendedColorType::Rgb8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgconv_image::Rgb8;

    #[test]
    fn encode_header() -> Result<(), IoError> {
        let image = Image::from_size_pixel([2, 1].into(), Rgb8::new(1, 2, 3))?;
        let bytes = encode_image_ppm_rgb8(&image)?;
        assert!(bytes.starts_with(b"P6"));
        assert!(bytes.ends_with(&[1, 2, 3, 1, 2, 3]));
        Ok(())
    }

    #[test]
    fn decode_ascii_ppm() -> Result<(), IoError> {
        let image = decode_image_ppm_rgb8(b"P3\n2 1\n255\n255 0 0 0 0 255\n")?;
        assert_eq!(image.size(), ImageSize::from([2, 1]));
        assert_eq!(image.get_pixel(0, 0)?, Rgb8::new(255, 0, 0));
        assert_eq!(image.get_pixel(1, 0)?, Rgb8::new(0, 0, 255));
        Ok(())
    }

    #[test]
    fn read_write_ppm() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.ppm");

        let image = Image::<u8, 3>::new([3, 2].into(), (0..18).map(|v| v * 14).collect())?;
        write_image_ppm_rgb8(&file_path, &image)?;
        let image_back = read_image_ppm_rgb8(&file_path)?;
        assert_eq!(image_back, image);
        Ok(())
    }

    #[test]
    fn decode_garbage() {
        assert!(decode_image_ppm_rgb8(b"P6\nnot a header").is_err());
    }
}
