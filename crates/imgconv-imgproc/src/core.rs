use imgconv_image::Image;

use crate::parallel;

/// Invert every channel of an 8-bit image in place.
///
/// Each channel value `c` becomes `255 - c`.
///
/// # Arguments
///
/// * `image` - The image to invert, with shape (H, W, C).
///
/// # Example
///
/// ```
/// use imgconv_image::Image;
/// use imgconv_imgproc::core::negate;
///
/// let mut image = Image::<u8, 3>::new([1, 1].into(), vec![0, 100, 255]).unwrap();
/// negate(&mut image);
///
/// assert_eq!(image.as_slice(), &[255, 155, 0]);
/// ```
pub fn negate<const C: usize>(image: &mut Image<u8, C>) {
    parallel::par_iter_rows_inplace(image, |pixel| {
        pixel.iter_mut().for_each(|v| *v = u8::MAX - *v);
    });
}
