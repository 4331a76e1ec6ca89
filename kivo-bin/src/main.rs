use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::ArgMatches;
use kivo_core::options::{DecoderOptions, EncoderOptions};
use kivo_jpeg::JpegEncoder;
use kivo_png::PngDecoder;
use log::{info, Level};

mod cmd_args;

fn setup_logger(matches: &ArgMatches)
{
    let log_level = if *matches.get_one::<bool>("verbose").unwrap()
    {
        Level::Trace
    }
    else
    {
        Level::Error
    };

    simple_logger::init_with_level(log_level).unwrap();
}

/// Replace the last extension with `.jpg`, or append it when the
/// input has none
fn derive_output_path(input: &Path) -> PathBuf
{
    input.with_extension("jpg")
}

fn run(matches: &ArgMatches) -> Result<(), String>
{
    let input = PathBuf::from(matches.get_one::<OsString>("in").unwrap());

    let output = matches
        .get_one::<OsString>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| derive_output_path(&input));

    let quality = *matches.get_one::<u8>("quality").unwrap();

    info!("Input file: {}", input.display());
    info!("Output file: {}", output.display());
    info!("Quality: {quality}");

    let contents = std::fs::read(&input)
        .map_err(|err| format!("Cannot open {}: {err}", input.display()))?;

    let image = PngDecoder::new_with_options(&contents, DecoderOptions::default())
        .decode()
        .map_err(|err| format!("Error decoding {}: {err:?}", input.display()))?;

    info!("Image size: {}x{}", image.width(), image.height());

    let options = EncoderOptions::default().set_quality(quality);

    let jpeg = JpegEncoder::new_with_options(&image, options)
        .encode()
        .map_err(|err| format!("Error encoding: {err:?}"))?;

    // the whole file is built before anything touches the
    // filesystem, a failed conversion leaves no partial output
    std::fs::write(&output, &jpeg)
        .map_err(|err| format!("Cannot write {}: {err}", output.display()))?;

    println!("Converted {} -> {}", input.display(), output.display());

    Ok(())
}

fn main()
{
    let matches = cmd_args::create_cmd_args().get_matches();

    setup_logger(&matches);

    if let Err(message) = run(&matches)
    {
        eprintln!("Error: {message}");
        exit(1);
    }
}
