use std::{fmt, str::FromStr};

use imgconv_image::{Image, ImageError};

use crate::{core, filter, flip};

/// A pixel transformation that can be chained in a pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Invert every channel, see [`core::negate`].
    Negate,
    /// Reverse the row order, see [`flip::vertical_flip`].
    MirrorVertical,
    /// Reverse the column order, see [`flip::horizontal_flip`].
    MirrorHorizontal,
    /// Replace the image by its edge magnitude, see [`filter::sobel`].
    Sobel,
}

impl Transform {
    /// All transforms, in menu order.
    pub const ALL: [Transform; 4] = [
        Transform::Negate,
        Transform::MirrorVertical,
        Transform::MirrorHorizontal,
        Transform::Sobel,
    ];

    /// The canonical name of the transform.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Negate => "negate",
            Transform::MirrorVertical => "vmirror",
            Transform::MirrorHorizontal => "hmirror",
            Transform::Sobel => "sobel",
        }
    }

    /// The number used to select the transform from a numbered menu.
    pub fn menu_code(&self) -> u8 {
        match self {
            Transform::Negate => 1,
            Transform::MirrorVertical => 2,
            Transform::MirrorHorizontal => 3,
            Transform::Sobel => 4,
        }
    }

    /// A short human readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Transform::Negate => "Negate",
            Transform::MirrorVertical => "Vertical mirroring",
            Transform::MirrorHorizontal => "Horizontal mirroring",
            Transform::Sobel => "Sobel's transformation",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a transform name cannot be parsed.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown transform: {0}. Expected one of negate, vmirror, hmirror, sobel or 1-4")]
pub struct ParseTransformError(pub String);

impl FromStr for Transform {
    type Err = ParseTransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negate" | "1" => Ok(Transform::Negate),
            "vmirror" | "mirror-vertical" | "2" => Ok(Transform::MirrorVertical),
            "hmirror" | "mirror-horizontal" | "3" => Ok(Transform::MirrorHorizontal),
            "sobel" | "4" => Ok(Transform::Sobel),
            _ => Err(ParseTransformError(s.to_string())),
        }
    }
}

/// Apply a single transform to an RGB image.
///
/// Negate and the mirrors modify the image in place; sobel replaces it with a
/// new image of the same size.
pub fn apply_transform(
    mut image: Image<u8, 3>,
    transform: Transform,
) -> Result<Image<u8, 3>, ImageError> {
    log::debug!("applying {transform} to {}", image.size());
    match transform {
        Transform::Negate => core::negate(&mut image),
        Transform::MirrorVertical => flip::vertical_flip(&mut image),
        Transform::MirrorHorizontal => flip::horizontal_flip(&mut image),
        Transform::Sobel => return filter::sobel(&image),
    }
    Ok(image)
}

/// Apply a list of transforms to an RGB image, in the given order.
///
/// An empty list returns the image unchanged.
///
/// # Example
///
/// ```
/// use imgconv_image::{Image, Rgb8};
/// use imgconv_imgproc::pipeline::{apply_transforms, Transform};
///
/// let image = Image::from_pixels(
///     [2, 1].into(),
///     &[Rgb8::new(10, 20, 30), Rgb8::new(40, 50, 60)],
/// )
/// .unwrap();
///
/// let out = apply_transforms(image, &[Transform::MirrorHorizontal, Transform::Negate]).unwrap();
///
/// assert_eq!(out.get_pixel(0, 0).unwrap(), Rgb8::new(215, 205, 195));
/// assert_eq!(out.get_pixel(1, 0).unwrap(), Rgb8::new(245, 235, 225));
/// ```
pub fn apply_transforms(
    image: Image<u8, 3>,
    transforms: &[Transform],
) -> Result<Image<u8, 3>, ImageError> {
    transforms
        .iter()
        .try_fold(image, |image, &transform| apply_transform(image, transform))
}

#[cfg(test)]
mod tests {
    use super::{apply_transforms, Transform};
    use imgconv_image::{Image, ImageError, Rgb8};

    #[test]
    fn test_parse_transform() {
        assert_eq!("negate".parse::<Transform>(), Ok(Transform::Negate));
        assert_eq!("VMirror".parse::<Transform>(), Ok(Transform::MirrorVertical));
        assert_eq!("mirror-horizontal".parse::<Transform>(), Ok(Transform::MirrorHorizontal));
        assert_eq!(" 4 ".parse::<Transform>(), Ok(Transform::Sobel));
        assert!("blur".parse::<Transform>().is_err());
        assert!("0".parse::<Transform>().is_err());
    }

    #[test]
    fn test_name_and_menu_code_round_trip() {
        for t in Transform::ALL {
            assert_eq!(t.to_string().parse::<Transform>(), Ok(t));
            assert_eq!(t.menu_code().to_string().parse::<Transform>(), Ok(t));
        }
    }

    #[test]
    fn test_empty_pipeline_is_noop() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([2, 2].into(), (0..12).collect())?;
        assert_eq!(apply_transforms(image.clone(), &[])?, image);
        Ok(())
    }

    #[test]
    fn test_mirror_then_negate() -> Result<(), ImageError> {
        let image = Image::from_pixels(
            [2, 1].into(),
            &[Rgb8::new(10, 20, 30), Rgb8::new(40, 50, 60)],
        )?;
        let out = apply_transforms(image, &[Transform::MirrorHorizontal, Transform::Negate])?;
        assert_eq!(
            out.pixels().collect::<Vec<_>>(),
            vec![Rgb8::new(215, 205, 195), Rgb8::new(245, 235, 225)]
        );
        Ok(())
    }

    #[test]
    fn test_order_matters() -> Result<(), ImageError> {
        // 3x3 with a single bright pixel in the top-left corner
        let mut image = Image::from_size_pixel([3, 3].into(), Rgb8::BLACK)?;
        image.set_pixel(0, 0, Rgb8::WHITE)?;

        let a = apply_transforms(image.clone(), &[Transform::Sobel, Transform::Negate])?;
        let b = apply_transforms(image, &[Transform::Negate, Transform::Sobel])?;

        // negate last turns the black sobel border white
        assert_eq!(a.get_pixel(0, 0)?, Rgb8::WHITE);
        assert_eq!(b.get_pixel(0, 0)?, Rgb8::BLACK);
        Ok(())
    }

    #[test]
    fn test_double_mirrors_are_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([4, 3].into(), (0..36).collect())?;
        let out = apply_transforms(
            image.clone(),
            &[
                Transform::MirrorVertical,
                Transform::MirrorHorizontal,
                Transform::MirrorVertical,
                Transform::MirrorHorizontal,
            ],
        )?;
        assert_eq!(out, image);
        Ok(())
    }
}
