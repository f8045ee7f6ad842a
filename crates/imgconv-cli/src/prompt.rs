use std::io::{self, BufRead, Write};

use imgconv::imgproc::pipeline::Transform;

/// Code that ends the transform menu.
const MENU_DONE: i32 = -1;

/// Code of the menu entry that does nothing.
const MENU_NOTHING: i32 = 0;

/// Print `message` and read one whitespace-trimmed token from `input`.
///
/// Returns an empty string at end of input.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Print the numbered transform menu and read selections until `-1` or the
/// end of input.
///
/// Invalid entries are reported and skipped, `0` selects nothing.
pub fn prompt_transforms<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Vec<Transform>> {
    writeln!(
        output,
        "You may select one or more options to edit the image. They are applied in the order you provide."
    )?;
    writeln!(
        output,
        "Enter the number of the option(s) to select it, or enter {MENU_DONE} to finish."
    )?;
    writeln!(output, "{MENU_NOTHING} - Nothing")?;
    for transform in Transform::ALL {
        writeln!(output, "{} - {}", transform.menu_code(), transform.description())?;
    }
    output.flush()?;

    let mut transforms = Vec::new();
    for line in input.lines() {
        for token in line?.split_whitespace() {
            match token.parse::<i32>() {
                Ok(MENU_DONE) => return Ok(transforms),
                Ok(MENU_NOTHING) => {}
                _ => match token.parse::<Transform>() {
                    Ok(transform) => transforms.push(transform),
                    Err(_) => writeln!(output, "Invalid option. Please try again.")?,
                },
            }
        }
    }

    Ok(transforms)
}
