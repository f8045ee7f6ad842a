use std::{fs, path::Path};

use rayon::prelude::*;

use imgconv_image::{Image, ImageSize};

use crate::error::IoError;

/// Size in bytes of the bitmap file header.
pub const BMP_FILE_HEADER_SIZE: usize = 14;

/// Size in bytes of the `BITMAPINFOHEADER`.
pub const BMP_INFO_HEADER_SIZE: usize = 40;

/// Offset of the pixel data in the files written by this codec.
pub const BMP_HEADER_SIZE: usize = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE;

const BMP_MAGIC: [u8; 2] = *b"BM";
const BMP_PLANES: u16 = 1;
const BMP_BIT_COUNT: u16 = 24;
const BMP_COMPRESSION_RGB: u32 = 0;
// 300 DPI
const BMP_PELS_PER_METER: i32 = 11811;
const BMP_CLR_IMPORTANT: u32 = 0x0100_0000;

/// Error types for the BMP module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BmpError {
    /// The data ends before the headers or the pixel rows do.
    #[error("Truncated bmp data: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Number of bytes required.
        expected: usize,
        /// Number of bytes available.
        actual: usize,
    },

    /// The file does not start with `BM`.
    #[error("Invalid bmp signature: {0:?}")]
    InvalidMagic([u8; 2]),

    /// The info header is smaller than a `BITMAPINFOHEADER`.
    #[error("Unsupported bmp info header size: {0}")]
    UnsupportedHeader(u32),

    /// Width or height is zero or negative.
    #[error("Invalid bmp dimensions: {0}x{1}")]
    InvalidDimensions(i32, i32),

    /// Only 24 bits per pixel are supported.
    #[error("Unsupported bmp bit count: {0}")]
    UnsupportedBitCount(u16),

    /// Only uncompressed data is supported.
    #[error("Unsupported bmp compression: {0}")]
    UnsupportedCompression(u32),

    /// The pixel data offset points inside the headers.
    #[error("Invalid bmp pixel data offset: {0}")]
    InvalidPixelOffset(u32),

    /// An image without pixels cannot be encoded.
    #[error("Cannot encode an empty image")]
    EmptyImage,

    /// The image does not fit the 32-bit fields of the headers.
    #[error("Image too large for bmp: {0}x{1}")]
    ImageTooLarge(usize, usize),
}

/// Compute the number of bytes of an encoded row of `width` pixels.
///
/// Each pixel takes 3 bytes and rows are padded to a multiple of 4 bytes.
///
/// ```
/// use imgconv_io::bmp::bmp_stride;
///
/// assert_eq!(bmp_stride(1), 4);
/// assert_eq!(bmp_stride(4), 12);
/// assert_eq!(bmp_stride(5), 16);
/// ```
pub fn bmp_stride(width: usize) -> usize {
    4 * ((width * 3 + 3) / 4)
}

/// The file header and info header of a bitmap, as stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    /// Total size of the file in bytes.
    pub file_size: u32,
    /// Offset of the pixel data from the start of the file.
    pub pixel_offset: u32,
    /// Size of the info header.
    pub header_size: u32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels, positive for bottom-up rows.
    pub height: i32,
    /// Number of color planes.
    pub planes: u16,
    /// Bits per pixel.
    pub bit_count: u16,
    /// Compression method.
    pub compression: u32,
    /// Size of the pixel data in bytes.
    pub image_size: u32,
    /// Horizontal resolution in pixels per meter.
    pub x_pels_per_meter: i32,
    /// Vertical resolution in pixels per meter.
    pub y_pels_per_meter: i32,
    /// Number of palette colors.
    pub clr_used: u32,
    /// Number of important colors.
    pub clr_important: u32,
}

impl BmpHeader {
    /// Build the header of a 24-bit uncompressed bitmap of the given size.
    pub fn new(size: ImageSize) -> Result<Self, BmpError> {
        if size.width == 0 || size.height == 0 {
            return Err(BmpError::EmptyImage);
        }

        let too_large = || BmpError::ImageTooLarge(size.width, size.height);
        let width = i32::try_from(size.width).map_err(|_| too_large())?;
        let height = i32::try_from(size.height).map_err(|_| too_large())?;
        let image_size = bmp_stride(size.width)
            .checked_mul(size.height)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(too_large)?;
        let file_size = image_size
            .checked_add(BMP_HEADER_SIZE as u32)
            .ok_or_else(too_large)?;

        Ok(Self {
            file_size,
            pixel_offset: BMP_HEADER_SIZE as u32,
            header_size: BMP_INFO_HEADER_SIZE as u32,
            width,
            height,
            planes: BMP_PLANES,
            bit_count: BMP_BIT_COUNT,
            compression: BMP_COMPRESSION_RGB,
            image_size,
            x_pels_per_meter: BMP_PELS_PER_METER,
            y_pels_per_meter: BMP_PELS_PER_METER,
            clr_used: 0,
            clr_important: BMP_CLR_IMPORTANT,
        })
    }

    /// Serialize both headers field by field in little-endian order.
    pub fn to_bytes(&self) -> [u8; BMP_HEADER_SIZE] {
        let mut buf = [0u8; BMP_HEADER_SIZE];

        // file header, the 4 reserved bytes at 6..10 stay zero
        buf[0..2].copy_from_slice(&BMP_MAGIC);
        buf[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        buf[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());

        // info header
        buf[14..18].copy_from_slice(&self.header_size.to_le_bytes());
        buf[18..22].copy_from_slice(&self.width.to_le_bytes());
        buf[22..26].copy_from_slice(&self.height.to_le_bytes());
        buf[26..28].copy_from_slice(&self.planes.to_le_bytes());
        buf[28..30].copy_from_slice(&self.bit_count.to_le_bytes());
        buf[30..34].copy_from_slice(&self.compression.to_le_bytes());
        buf[34..38].copy_from_slice(&self.image_size.to_le_bytes());
        buf[38..42].copy_from_slice(&self.x_pels_per_meter.to_le_bytes());
        buf[42..46].copy_from_slice(&self.y_pels_per_meter.to_le_bytes());
        buf[46..50].copy_from_slice(&self.clr_used.to_le_bytes());
        buf[50..54].copy_from_slice(&self.clr_important.to_le_bytes());

        buf
    }

    /// Parse the headers from the start of a bitmap file.
    ///
    /// Only the signature and the length are checked here, see
    /// [`BmpHeader::validate`] for the checks on the field values.
    pub fn parse(src: &[u8]) -> Result<Self, BmpError> {
        if src.len() >= 2 && src[0..2] != BMP_MAGIC {
            return Err(BmpError::InvalidMagic([src[0], src[1]]));
        }

        if src.len() < BMP_HEADER_SIZE {
            return Err(BmpError::Truncated {
                expected: BMP_HEADER_SIZE,
                actual: src.len(),
            });
        }

        Ok(Self {
            file_size: read_u32(src, 2),
            pixel_offset: read_u32(src, 10),
            header_size: read_u32(src, 14),
            width: read_i32(src, 18),
            height: read_i32(src, 22),
            planes: read_u16(src, 26),
            bit_count: read_u16(src, 28),
            compression: read_u32(src, 30),
            image_size: read_u32(src, 34),
            x_pels_per_meter: read_i32(src, 38),
            y_pels_per_meter: read_i32(src, 42),
            clr_used: read_u32(src, 46),
            clr_important: read_u32(src, 50),
        })
    }

    /// Check that the header describes an image this codec can decode.
    pub fn validate(&self) -> Result<(), BmpError> {
        if self.header_size < BMP_INFO_HEADER_SIZE as u32 {
            return Err(BmpError::UnsupportedHeader(self.header_size));
        }

        if self.width <= 0 || self.height <= 0 {
            return Err(BmpError::InvalidDimensions(self.width, self.height));
        }

        if self.bit_count != BMP_BIT_COUNT {
            return Err(BmpError::UnsupportedBitCount(self.bit_count));
        }

        if self.compression != BMP_COMPRESSION_RGB {
            return Err(BmpError::UnsupportedCompression(self.compression));
        }

        let min_offset = BMP_FILE_HEADER_SIZE as u64 + self.header_size as u64;
        if (self.pixel_offset as u64) < min_offset {
            return Err(BmpError::InvalidPixelOffset(self.pixel_offset));
        }

        Ok(())
    }

    /// The image size described by the header.
    ///
    /// PRECONDITION: the header has been validated.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width as usize,
            height: self.height as usize,
        }
    }
}

fn read_u16(data: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([data[off], data[off + 1]])
}

fn read_u32(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
}

fn read_i32(data: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
}

/// Encodes an RGB image as a 24-bit uncompressed bitmap.
///
/// The rows are written bottom-up, each pixel as `B, G, R`, and every row is
/// zero padded to [`bmp_stride`] bytes.
///
/// # Arguments
///
/// - `image` - The image to encode.
///
/// # Errors
///
/// Fails with [`BmpError::EmptyImage`] when the image has no pixels and with
/// [`BmpError::ImageTooLarge`] when its size does not fit the headers.
///
/// # Example
///
/// ```
/// use imgconv_image::{Image, Rgb8};
/// use imgconv_io::bmp::{encode_image_bmp, BMP_HEADER_SIZE};
///
/// let image = Image::from_size_pixel([1, 1].into(), Rgb8::new(255, 0, 0)).unwrap();
/// let bytes = encode_image_bmp(&image).unwrap();
///
/// assert_eq!(&bytes[..2], b"BM");
/// assert_eq!(&bytes[BMP_HEADER_SIZE..], &[0, 0, 255, 0]);
/// ```
pub fn encode_image_bmp(image: &Image<u8, 3>) -> Result<Vec<u8>, IoError> {
    let header = BmpHeader::new(image.size())?;
    let (width, height) = (image.width(), image.height());
    let stride = bmp_stride(width);

    let mut buf = vec![0u8; header.file_size as usize];
    let (header_buf, pixel_buf) = buf.split_at_mut(BMP_HEADER_SIZE);
    header_buf.copy_from_slice(&header.to_bytes());

    // every file row owns its slice, padding bytes are left as zero
    pixel_buf
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(file_row, dst_row)| {
            let src_row = image.row(height - 1 - file_row);
            dst_row
                .chunks_exact_mut(3)
                .zip(src_row.chunks_exact(3))
                .for_each(|(dst, src)| {
                    dst[0] = src[2];
                    dst[1] = src[1];
                    dst[2] = src[0];
                });
        });

    log::debug!("encoded {width}x{height} bmp, {} bytes", buf.len());

    Ok(buf)
}

/// Decodes a 24-bit uncompressed bitmap into an RGB image.
///
/// # Arguments
///
/// - `src` - Raw bytes of the bmp file.
///
/// # Errors
///
/// Fails with a [`BmpError`] when the signature, the header fields or the
/// data length are not valid. The input is never read out of bounds.
pub fn decode_image_bmp(src: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let header = BmpHeader::parse(src)?;
    header.validate()?;

    if header.header_size != BMP_INFO_HEADER_SIZE as u32 {
        log::warn!(
            "bmp info header of {} bytes, only the BITMAPINFOHEADER fields are used",
            header.header_size
        );
    }

    let size = header.size();
    let stride = bmp_stride(size.width);
    let row_len = size.width * 3;
    let offset = header.pixel_offset as usize;
    let expected = stride
        .checked_mul(size.height)
        .and_then(|n| n.checked_add(offset))
        .ok_or(BmpError::ImageTooLarge(size.width, size.height))?;

    if src.len() < expected {
        return Err(BmpError::Truncated {
            expected,
            actual: src.len(),
        }
        .into());
    }

    let pixel_data = &src[offset..expected];
    let mut image = Image::<u8, 3>::from_size_val(size, 0)?;

    image
        .as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let file_row = size.height - 1 - y;
            let src_row = &pixel_data[file_row * stride..file_row * stride + row_len];
            dst_row
                .chunks_exact_mut(3)
                .zip(src_row.chunks_exact(3))
                .for_each(|(dst, src)| {
                    dst[0] = src[2];
                    dst[1] = src[1];
                    dst[2] = src[0];
                });
        });

    log::debug!("decoded {} bmp", size);

    Ok(image)
}

/// Read a BMP image with three channels _(rgb8)_.
///
/// # Arguments
///
/// - `file_path` - The path to the BMP file.
///
/// # Returns
///
/// A RGB image with three channels _(rgb8)_.
pub fn read_image_bmp_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("bmp"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let bmp_data = fs::read(file_path)?;
    decode_image_bmp(&bmp_data)
}

/// Writes the given image to the given file path as a 24-bit BMP.
///
/// The image is fully encoded before the file is created, so an invalid image
/// never leaves a file behind.
///
/// # Arguments
///
/// - `file_path` - The path to the BMP image.
/// - `image` - The image to write.
pub fn write_image_bmp_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    let bmp_data = encode_image_bmp(image)?;
    fs::write(file_path, bmp_data)?;
    Ok(())
}
