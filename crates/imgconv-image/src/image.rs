use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use imgconv_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A single 8-bit RGB pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct Rgb8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb8 {
    /// Pure black.
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    /// Create a pixel from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray pixel with all channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(px: [u8; 3]) -> Self {
        Rgb8::new(px[0], px[1], px[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(px: Rgb8) -> Self {
        [px.r, px.g, px.b]
    }
}

/// Represents an image with pixel data.
///
/// The pixel data is stored row-major with interleaved channels, i.e. the
/// value of channel `c` of the pixel at `(x, y)` lives at
/// `(y * width + x) * CHANNELS + c`.
///
/// An image with a zero width or height is considered empty. Such an image is
/// a valid value but cannot be encoded.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use imgconv_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The value every channel of every pixel is set to.
    ///
    /// # Examples
    ///
    /// ```
    /// use imgconv_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Returns
    ///
    /// A new image with the pixel data cast to the given type.
    ///
    /// # Errors
    ///
    /// If any value cannot be represented in the target type.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Whether the image has no pixels, i.e. a zero width or height.
    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Number of values in one row, i.e. `width * CHANNELS`.
    pub fn row_len(&self) -> usize {
        self.size.width * CHANNELS
    }

    /// Get the values of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a valid row index.
    pub fn row(&self, y: usize) -> &[T] {
        let row_len = self.row_len();
        &self.data[y * row_len..(y + 1) * row_len]
    }

    /// Get the values of row `y` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a valid row index.
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let row_len = self.row_len();
        &mut self.data[y * row_len..(y + 1) * row_len]
    }

    fn pixel_offset(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok((y * self.width() + x) * CHANNELS)
    }
}

impl Image<u8, 3> {
    /// Create a new RGB image filled with a single color.
    ///
    /// # Examples
    ///
    /// ```
    /// use imgconv_image::{Image, ImageSize, Rgb8};
    ///
    /// let red = Rgb8::new(255, 0, 0);
    /// let image = Image::from_size_pixel([2, 1].into(), red).unwrap();
    ///
    /// assert_eq!(image.as_slice(), &[255, 0, 0, 255, 0, 0]);
    /// assert_eq!(image.get_pixel(1, 0).unwrap(), red);
    /// ```
    pub fn from_size_pixel(size: ImageSize, pixel: Rgb8) -> Result<Self, ImageError> {
        let data = <[u8; 3]>::from(pixel).repeat(size.num_pixels());
        Image::new(size, data)
    }

    /// Build an RGB image from a row-major list of pixels.
    pub fn from_pixels(size: ImageSize, pixels: &[Rgb8]) -> Result<Self, ImageError> {
        if pixels.len() != size.num_pixels() {
            return Err(ImageError::InvalidChannelShape(
                pixels.len() * 3,
                size.num_pixels() * 3,
            ));
        }
        let data = pixels.iter().flat_map(|&px| <[u8; 3]>::from(px)).collect();
        Image::new(size, data)
    }

    /// Get the pixel at column `x` and row `y`.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Rgb8, ImageError> {
        let offset = self.pixel_offset(x, y)?;
        let px = &self.data[offset..offset + 3];
        Ok(Rgb8::from([px[0], px[1], px[2]]))
    }

    /// Set the pixel at column `x` and row `y`.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Rgb8) -> Result<(), ImageError> {
        let offset = self.pixel_offset(x, y)?;
        self.data[offset..offset + 3].copy_from_slice(&<[u8; 3]>::from(pixel));
        Ok(())
    }

    /// Iterate over the pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.data
            .chunks_exact(3)
            .map(|px| Rgb8::from([px[0], px[1], px[2]]))
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize, Rgb8};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.num_pixels(), 200);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert!(!image.is_empty());

        Ok(())
    }

    #[test]
    fn image_wrong_length() {
        let res = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 11]);
        assert!(matches!(res, Err(ImageError::InvalidChannelShape(11, 12))));
    }

    #[test]
    fn image_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([0, 5].into(), vec![])?;
        assert!(image.is_empty());
        let image = Image::<u8, 3>::new([5, 0].into(), vec![])?;
        assert!(image.is_empty());
        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image_u8 = Image::<_, 3>::new([1, 2].into(), vec![0u8, 1, 2, 3, 4, 5])?;
        let image_f32: Image<f32, 3> = image_u8.cast()?;
        assert_eq!(image_f32.as_slice()[5], 5.0);

        let image_neg = Image::<i32, 1>::new([1, 1].into(), vec![-1])?;
        assert!(matches!(image_neg.cast::<u8>(), Err(ImageError::CastError)));

        Ok(())
    }

    #[test]
    fn image_pixels() -> Result<(), ImageError> {
        let mut image = Image::from_size_pixel([3, 2].into(), Rgb8::BLACK)?;
        image.set_pixel(2, 1, Rgb8::new(1, 2, 3))?;

        assert_eq!(image.get_pixel(2, 1)?, Rgb8::new(1, 2, 3));
        assert_eq!(image.get_pixel(0, 0)?, Rgb8::BLACK);
        assert_eq!(image.row(1), &[0, 0, 0, 0, 0, 0, 1, 2, 3]);
        assert!(matches!(
            image.get_pixel(3, 0),
            Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        ));

        let pixels = image.pixels().collect::<Vec<_>>();
        assert_eq!(pixels.len(), 6);
        assert_eq!(Image::from_pixels(image.size(), &pixels)?, image);

        Ok(())
    }
}
