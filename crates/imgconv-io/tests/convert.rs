use imgconv_image::{Image, Rgb8};
use imgconv_imgproc::pipeline::{apply_transforms, Transform};
use imgconv_io::{bmp, read_image_rgb8, write_image_rgb8, IoError};

fn gradient_image(width: usize, height: usize) -> Result<Image<u8, 3>, IoError> {
    let mut image = Image::from_size_pixel([width, height].into(), Rgb8::BLACK)?;
    for y in 0..height {
        for x in 0..width {
            let v = (x * 255 / width) as u8;
            image.set_pixel(x, y, Rgb8::new(v, (y * 10) as u8, 255 - v))?;
        }
    }
    Ok(image)
}

#[test]
fn bmp_to_ppm_with_transforms() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input_path = tmp_dir.path().join("input.bmp");
    let output_path = tmp_dir.path().join("output.ppm");

    let image = gradient_image(7, 5)?;
    write_image_rgb8(&input_path, &image)?;

    let transforms = [Transform::MirrorHorizontal, Transform::Negate];
    let loaded = read_image_rgb8(&input_path)?;
    let processed = apply_transforms(loaded, &transforms)?;
    write_image_rgb8(&output_path, &processed)?;

    let output = read_image_rgb8(&output_path)?;
    for y in 0..5 {
        for x in 0..7 {
            let src = image.get_pixel(6 - x, y)?;
            let dst = output.get_pixel(x, y)?;
            assert_eq!(dst, Rgb8::new(255 - src.r, 255 - src.g, 255 - src.b));
        }
    }
    Ok(())
}

#[test]
fn ppm_to_bmp_is_bit_exact() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input_path = tmp_dir.path().join("input.ppm");
    let output_path = tmp_dir.path().join("output.bmp");

    let image = gradient_image(5, 3)?;
    write_image_rgb8(&input_path, &image)?;
    write_image_rgb8(&output_path, &read_image_rgb8(&input_path)?)?;

    let bytes = std::fs::read(&output_path)?;
    assert_eq!(bytes, bmp::encode_image_bmp(&image)?);
    assert_eq!(bytes.len(), 54 + bmp::bmp_stride(5) * 3);
    Ok(())
}

#[test]
fn sobel_through_bmp() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let output_path = tmp_dir.path().join("edges.bmp");

    let edges = apply_transforms(gradient_image(6, 6)?, &[Transform::Sobel])?;
    write_image_rgb8(&output_path, &edges)?;

    let back = read_image_rgb8(&output_path)?;
    assert_eq!(back, edges);
    for x in 0..6 {
        assert_eq!(back.get_pixel(x, 0)?, Rgb8::BLACK);
        assert_eq!(back.get_pixel(x, 5)?, Rgb8::BLACK);
    }
    Ok(())
}

#[test]
fn load_failures_are_distinguishable() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;

    let missing = read_image_rgb8(tmp_dir.path().join("missing.bmp"));
    assert!(matches!(&missing, Err(e) if !e.is_format_error()));

    let bad_path = tmp_dir.path().join("bad.bmp");
    std::fs::write(&bad_path, b"XX not a bitmap at all, just some bytes to fill 54...")?;
    let bad = read_image_rgb8(&bad_path);
    assert!(matches!(&bad, Err(e) if e.is_format_error()));
    assert!(matches!(
        bad,
        Err(IoError::BmpError(bmp::BmpError::InvalidMagic(_)))
    ));
    Ok(())
}
