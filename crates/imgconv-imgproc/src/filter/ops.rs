use rayon::prelude::*;

use imgconv_image::{Image, ImageError};

use super::kernels;
use crate::color;

/// Value assigned to the pixels of the one-pixel border that has no full
/// 3x3 neighborhood in the sobel output.
pub const SOBEL_BORDER: u8 = 0;

/// Compute the sobel gradient magnitude of a single channel image.
///
/// For every pixel with a full 3x3 neighborhood the horizontal and vertical
/// gradients `gx` and `gy` are computed with the 3x3 sobel kernels and the
/// output is `sqrt(gx^2 + gy^2)`. The outermost one-pixel ring is set to
/// `border`. Images narrower or shorter than 3 pixels are filled with
/// `border`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 1).
/// * `border` - The value of the unconvolved border.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn sobel_magnitude(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    border: f32,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (cols, rows) = (src.cols(), src.rows());
    if cols < 3 || rows < 3 {
        dst.as_slice_mut().fill(border);
        return Ok(());
    }

    let (kernel_x, kernel_y) = kernels::sobel_kernels_3x3();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(r, dst_row)| {
            if r == 0 || r == rows - 1 {
                dst_row.fill(border);
                return;
            }

            dst_row[0] = border;
            dst_row[cols - 1] = border;

            for c in 1..cols - 1 {
                let mut gx = 0.0;
                let mut gy = 0.0;
                for (dy, (kx_row, ky_row)) in kernel_x.iter().zip(kernel_y.iter()).enumerate() {
                    let offset = (r + dy - 1) * cols + c - 1;
                    let window = &src_data[offset..offset + 3];
                    for ((&v, &kx), &ky) in window.iter().zip(kx_row).zip(ky_row) {
                        gx += v * kx;
                        gy += v * ky;
                    }
                }
                dst_row[c] = (gx * gx + gy * gy).sqrt();
            }
        });

    Ok(())
}

/// Detect edges of an RGB image with the sobel operator.
///
/// The image is first converted to grayscale with the BT.601 luma weights
/// (see [`color::gray_from_rgb`]), then the euclidean gradient magnitude is
/// computed, rounded and saturated to `[0, 255]`. The result is written to
/// all three channels of a new image with the same size as `src`; the
/// one-pixel border is [`SOBEL_BORDER`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
///
/// # Returns
///
/// The edge magnitude image with shape (H, W, 3).
///
/// # Example
///
/// ```
/// use imgconv_image::{Image, Rgb8};
/// use imgconv_imgproc::filter::{sobel, SOBEL_BORDER};
///
/// let image = Image::from_size_pixel([4, 4].into(), Rgb8::WHITE).unwrap();
/// let edges = sobel(&image).unwrap();
///
/// // a flat image has no edges
/// assert!(edges.as_slice().iter().all(|&v| v == SOBEL_BORDER));
/// ```
pub fn sobel(src: &Image<u8, 3>) -> Result<Image<u8, 3>, ImageError> {
    let src_f32 = src.cast::<f32>()?;

    let mut gray = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    color::gray_from_rgb(&src_f32, &mut gray)?;

    let mut magnitude = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    sobel_magnitude(&gray, &mut magnitude, SOBEL_BORDER as f32)?;

    let magnitude_u8 = Image::<u8, 1>::new(
        src.size(),
        magnitude
            .as_slice()
            .par_iter()
            .map(|&m| m.round().clamp(0.0, 255.0) as u8)
            .collect(),
    )?;

    let mut dst = Image::<u8, 3>::from_size_val(src.size(), SOBEL_BORDER)?;
    color::rgb_from_gray(&magnitude_u8, &mut dst)?;

    Ok(dst)
}
