use std::ffi::OsString;

use clap::{value_parser, Arg, ArgAction, Command};

pub fn create_cmd_args() -> Command
{
    Command::new("kivo")
        .about("PNG to baseline JPEG converter")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("in")
                .help("Input PNG file to read")
                .value_parser(value_parser!(OsString))
                .required(true)
        )
        .arg(
            Arg::new("out")
                .help("Output JPEG file, derived from the input name when absent")
                .value_parser(value_parser!(OsString))
        )
        .arg(
            Arg::new("quality")
                .short('q')
                .long("quality")
                .help("JPEG quality between 1 and 100")
                .value_parser(value_parser!(u8).range(1..=100))
                .default_value("85")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
        )
}
