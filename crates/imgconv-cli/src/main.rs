use argh::FromArgs;
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use imgconv::{
    image::ImageError,
    imgproc::pipeline::{self, Transform},
    io::{functional as F, ImageFormat, IoError},
};

mod prompt;

#[derive(FromArgs, Debug)]
/// Convert an image between BMP, JPEG and PPM, optionally applying transforms.
///
/// Missing file names are asked for interactively, together with the
/// transforms to apply.
struct Args {
    /// input and output image paths (.bmp, .jpg, .jpeg or .ppm)
    #[argh(positional)]
    files: Vec<PathBuf>,

    /// transform to apply, repeat to chain them in order: negate, vmirror, hmirror, sobel
    #[argh(option, short = 't')]
    transform: Vec<Transform>,
}

/// Failures of a conversion run, each mapped to its own exit code.
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Incorrect file names: {0}")]
    BadArguments(String),

    #[error("Terminal I/O failed. {0}")]
    Prompt(#[from] io::Error),

    #[error("Unknown format of the input file: {0}")]
    UnknownInputFormat(PathBuf),

    #[error("Unknown format of the output file: {0}")]
    UnknownOutputFormat(PathBuf),

    #[error("Loading failed. {0}")]
    Load(IoError),

    #[error("Saving failed. {0}")]
    Save(IoError),

    #[error("Transform failed. {0}")]
    Transform(#[from] ImageError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        let code = match self {
            CliError::BadArguments(_) | CliError::Prompt(_) => 1,
            CliError::UnknownInputFormat(_) => 2,
            CliError::UnknownOutputFormat(_) => 3,
            CliError::Load(_) => 4,
            CliError::Save(_) => 5,
            CliError::Transform(_) => 6,
        };
        ExitCode::from(code)
    }
}

/// A fully resolved conversion request.
#[derive(Debug, PartialEq)]
struct Conversion {
    input: PathBuf,
    output: PathBuf,
    transforms: Vec<Transform>,
}

/// Fill the missing parts of the arguments from the prompts.
fn resolve<R: BufRead, W: Write>(
    args: Args,
    input: &mut R,
    output: &mut W,
) -> Result<Conversion, CliError> {
    if args.files.len() > 2 {
        return Err(CliError::BadArguments(
            "expected <in_file> <out_file>".to_string(),
        ));
    }
    let mut files = args.files.into_iter();
    let (arg_input, arg_output) = (files.next(), files.next());

    let interactive = arg_input.is_none() || arg_output.is_none();
    if interactive {
        writeln!(output, "Welcome to the Image Converter!")?;
        writeln!(output, "Supported formats: JPG, BMP, PPM.")?;
    }

    let input_path = match arg_input {
        Some(path) => path,
        None => PathBuf::from(prompt::prompt_line(
            input,
            output,
            "Enter input filename (e.g., file.jpg): ",
        )?),
    };
    let output_path = match arg_output {
        Some(path) => path,
        None => PathBuf::from(prompt::prompt_line(
            input,
            output,
            "Enter output filename (e.g., file.bmp): ",
        )?),
    };

    if input_path.as_os_str().is_empty() || output_path.as_os_str().is_empty() {
        return Err(CliError::BadArguments(
            "expected <in_file> <out_file>".to_string(),
        ));
    }

    let transforms = if interactive && args.transform.is_empty() {
        prompt::prompt_transforms(input, output)?
    } else {
        args.transform
    };

    Ok(Conversion {
        input: input_path,
        output: output_path,
        transforms,
    })
}

fn check_format(path: &Path, err: fn(PathBuf) -> CliError) -> Result<ImageFormat, CliError> {
    ImageFormat::from_path(path).ok_or_else(|| err(path.to_path_buf()))
}

/// Load, transform and save one image.
fn convert(conversion: &Conversion) -> Result<(), CliError> {
    let input_format = check_format(&conversion.input, CliError::UnknownInputFormat)?;
    let output_format = check_format(&conversion.output, CliError::UnknownOutputFormat)?;

    log::info!(
        "converting {} ({input_format}) to {} ({output_format})",
        conversion.input.display(),
        conversion.output.display()
    );

    let image = F::read_image_rgb8(&conversion.input).map_err(CliError::Load)?;
    log::info!("loaded {}", image.size());

    let image = pipeline::apply_transforms(image, &conversion.transforms)?;

    F::write_image_rgb8(&conversion.output, &image).map_err(CliError::Save)?;

    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let conversion = resolve(args, &mut stdin.lock(), &mut stdout)?;
    convert(&conversion)?;
    writeln!(
        stdout,
        "Successfully converted and saved to {}",
        conversion.output.display()
    )?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            e.exit_code()
        }
    }
}
