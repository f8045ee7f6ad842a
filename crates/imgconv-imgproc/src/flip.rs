use imgconv_image::Image;

use crate::parallel;

/// Flip the input image horizontally, in place.
///
/// The pixel at column `x` is swapped with the pixel at column `width - 1 - x`
/// in every row. Rows are processed in parallel.
///
/// # Arguments
///
/// * `image` - The image to flip, with shape (H, W, C).
///
/// # Example
///
/// ```
/// use imgconv_image::Image;
/// use imgconv_imgproc::flip::horizontal_flip;
///
/// let mut image = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 3]).unwrap();
/// horizontal_flip(&mut image);
///
/// assert_eq!(image.as_slice(), &[3, 2, 1]);
/// ```
pub fn horizontal_flip<T, const C: usize>(image: &mut Image<T, C>)
where
    T: Send + Sync,
{
    let cols = image.cols();
    parallel::par_rows_mut(image, |_, row| {
        let mut i = 0;
        let mut j = cols - 1;
        while i < j {
            for c in 0..C {
                row.swap(i * C + c, j * C + c);
            }
            i += 1;
            j -= 1;
        }
    });
}

/// Flip the input image vertically, in place.
///
/// Row `y` is swapped with row `height - 1 - y`; whole rows are exchanged.
///
/// # Arguments
///
/// * `image` - The image to flip, with shape (H, W, C).
///
/// # Example
///
/// ```
/// use imgconv_image::Image;
/// use imgconv_imgproc::flip::vertical_flip;
///
/// let mut image = Image::<u8, 1>::new([1, 3].into(), vec![1, 2, 3]).unwrap();
/// vertical_flip(&mut image);
///
/// assert_eq!(image.as_slice(), &[3, 2, 1]);
/// ```
pub fn vertical_flip<T, const C: usize>(image: &mut Image<T, C>) {
    let row_len = image.row_len();
    let rows = image.rows();
    if row_len == 0 || rows < 2 {
        return;
    }

    let data = image.as_slice_mut();
    for k in 0..rows / 2 {
        // split so the top row and its mirror can be borrowed together
        let (top, bottom) = data.split_at_mut((rows - 1 - k) * row_len);
        top[k * row_len..(k + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
    }
}
