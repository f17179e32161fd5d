// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate fractals;
#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use fractals::{render, write_png, Config, FractalError, PixelBuffer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn validate_positive(
    s: &str,
    isnotanumber_err: &str,
    isnotpositive_err: &str,
) -> Result<(), String> {
    match usize::from_str(s) {
        Ok(0) => Err(isnotpositive_err.to_string()),
        Ok(_) => Ok(()),
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const FRACTAL: &str = "fractal";
const LEFT: &str = "left";
const BOTTOM: &str = "bottom";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const THRESHOLD: &str = "threshold";
const PARAM: &str = "param";
const ITERS: &str = "iters";
const IMAGE_WIDTH: &str = "image-width";
const COLORS: &str = "colors";
const BOLD_MODE: &str = "bold-mode";
const THREADS: &str = "threads";
const OUTPUT: &str = "output";

fn float_arg(
    name: &'static str,
    short: &'static str,
    help: &'static str,
    err: &'static str,
) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(name)
        .short(short)
        .takes_value(true)
        .allow_hyphen_values(true)
        .validator(move |s| validate_number::<f64>(&s, err))
        .help(help)
}

fn args() -> ArgMatches<'static> {
    App::new("fractals")
        .version("0.1.0")
        .about("Renders a Mandelbrot or Julia set as a PNG on standard output")
        .arg(
            Arg::with_name(FRACTAL)
                .required(true)
                .index(1)
                .help("Type of fractal: mandelbrot or julia"),
        )
        .arg(float_arg(
            LEFT,
            "l",
            "Left bound of image in fractal [default: 0]",
            "Could not parse left bound",
        ))
        .arg(float_arg(
            BOTTOM,
            "b",
            "Bottom bound of image in fractal [default: 0]",
            "Could not parse bottom bound",
        ))
        .arg(float_arg(
            WIDTH,
            "W",
            "Width of image in fractal [default: 1]",
            "Could not parse fractal width",
        ))
        .arg(float_arg(
            HEIGHT,
            "H",
            "Height of image in fractal [default: 1]",
            "Could not parse fractal height",
        ))
        .arg(float_arg(
            THRESHOLD,
            "t",
            "Fractal computation threshold [default: 1000]",
            "Could not parse threshold",
        ))
        .arg(
            Arg::with_name(PARAM)
                .long(PARAM)
                .short("p")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Complex parameter for Julia fractal, e.g. -0.8+0.156i [default: 0+0i]"),
        )
        .arg(
            Arg::with_name(ITERS)
                .long(ITERS)
                .short("i")
                .takes_value(true)
                .validator(|s| {
                    validate_positive(
                        &s,
                        "Could not parse iteration count",
                        "Iteration count must be at least 1",
                    )
                })
                .help("Number of fractal iterations [default: 100]"),
        )
        .arg(
            Arg::with_name(IMAGE_WIDTH)
                .long(IMAGE_WIDTH)
                .short("w")
                .takes_value(true)
                .validator(|s| {
                    validate_positive(
                        &s,
                        "Could not parse image width",
                        "Image width must be at least 1 pixel",
                    )
                })
                .help("Width of image (pixels) [default: 1000]"),
        )
        .arg(
            Arg::with_name(COLORS)
                .long(COLORS)
                .short("c")
                .takes_value(true)
                .help("Color scheme: blue-to-yellow, red-to-green, or greyscale [default: blue-to-yellow]"),
        )
        .arg(
            Arg::with_name(BOLD_MODE)
                .long(BOLD_MODE)
                .short("B")
                .help("Enable bold mode!"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("j")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_number::<i64>(&s, "Could not parse thread count"))
                .help("Number of threads to use in renderer [default: number of CPUs]"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Write the image to this file instead of standard output"),
        )
        .get_matches()
}

/// Overrides a default with the command line's value, if one was given.
/// The validators above have already vetted the text.
fn value_or<T: FromStr>(matches: &ArgMatches, name: &str, default: T) -> T {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .unwrap_or(default)
}

fn build_config(matches: &ArgMatches) -> Config {
    let defaults = Config::default();
    // Zero or fewer threads falls back to a single worker.
    let threads = value_or::<i64>(matches, THREADS, defaults.threads as i64).max(0) as usize;
    Config {
        fractal: value_or(matches, FRACTAL, defaults.fractal),
        left: value_or(matches, LEFT, defaults.left),
        bottom: value_or(matches, BOTTOM, defaults.bottom),
        width: value_or(matches, WIDTH, defaults.width),
        height: value_or(matches, HEIGHT, defaults.height),
        threshold: value_or(matches, THRESHOLD, defaults.threshold),
        param: value_or(matches, PARAM, defaults.param),
        iterations: value_or(matches, ITERS, defaults.iterations),
        image_width: value_or(matches, IMAGE_WIDTH, defaults.image_width),
        colors: value_or(matches, COLORS, defaults.colors),
        bold: matches.is_present(BOLD_MODE),
        threads,
    }
}

fn write_image(outfile: Option<&str>, image: &PixelBuffer) -> Result<(), FractalError> {
    match outfile {
        Some(path) => {
            let mut output = BufWriter::new(File::create(path)?);
            write_png(image, &mut output)?;
            output.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut output = BufWriter::new(stdout.lock());
            write_png(image, &mut output)?;
            output.flush()?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = args();
    let config = build_config(&matches);
    info!("{:?}", config);

    let request = match config.request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}\n\n{}", e, matches.usage());
            process::exit(1);
        }
    };

    let image = render(&request, config.threads);

    if let Err(e) = write_image(matches.value_of(OUTPUT), &image) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
