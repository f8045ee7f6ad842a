use crate::parallel;
use imgconv_image::{Image, ImageError};

// BT.601 luma weights
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Compute the luma of every pixel of a floating point RGB image.
///
/// `dst` receives `0.299 * r + 0.587 * g + 0.114 * b` for each pixel of
/// `src`, keeping the scale of the input (no normalization to `[0, 1]`).
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] when `src` and `dst` differ in
/// size.
///
/// # Example
///
/// ```
/// use imgconv_image::Image;
/// use imgconv_imgproc::color::gray_from_rgb;
///
/// let rgb = Image::<f32, 3>::new([2, 1].into(), vec![100.0, 100.0, 100.0, 0.0, 0.0, 50.0]).unwrap();
/// let mut luma = Image::<f32, 1>::from_size_val(rgb.size(), 0.0).unwrap();
///
/// gray_from_rgb(&rgb, &mut luma).unwrap();
/// assert!((luma.as_slice()[0] - 100.0).abs() < 1e-4);
/// assert!((luma.as_slice()[1] - 5.7).abs() < 1e-4);
/// ```
pub fn gray_from_rgb<T>(src: &Image<T, 3>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rw = T::from(RW).ok_or(ImageError::CastError)?;
    let gw = T::from(GW).ok_or(ImageError::CastError)?;
    let bw = T::from(BW).ok_or(ImageError::CastError)?;

    parallel::par_iter_rows(src, dst, |rgb, luma| {
        luma[0] = rw * rgb[0] + gw * rgb[1] + bw * rgb[2];
    });

    Ok(())
}

/// Copy a single channel image into all three channels of `dst`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] when `src` and `dst` differ in
/// size.
pub fn rgb_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.fill(src_pixel[0]);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use imgconv_image::{Image, ImageError, ImageSize};

    #[test]
    fn gray_from_rgb() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            [3, 1].into(),
            vec![255.0, 0.0, 0.0, 0.0, 255.0, 0.0, 0.0, 0.0, 255.0],
        )?;
        let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
        super::gray_from_rgb(&image, &mut gray)?;

        let expected: [f32; 3] = [0.299 * 255.0, 0.587 * 255.0, 0.114 * 255.0];
        for (a, b) in gray.as_slice().iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-3, "{a} != {b}");
        }
        Ok(())
    }

    #[test]
    fn gray_from_rgb_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::from_size_val([2, 2].into(), 0.0)?;
        let mut gray = Image::<f32, 1>::from_size_val([2, 3].into(), 0.0)?;
        let res = super::gray_from_rgb(&image, &mut gray);
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 2, 2, 3)));
        Ok(())
    }

    #[test]
    fn rgb_from_gray() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![7, 9],
        )?;
        let mut rgb = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::rgb_from_gray(&image, &mut rgb)?;
        assert_eq!(rgb.as_slice(), &[7, 7, 7, 9, 9, 9]);
        Ok(())
    }
}
