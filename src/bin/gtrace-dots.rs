use std::{env, fs, process};
use serde_json::json;
use tracing::{debug, error};

use gtrace::sample::{ColorScale, SampleOptions};

fn usage() -> ! {
    eprintln!("usage: gtrace-dots FILE [--options JSON-FILE] [--density N] \
               [--scale endpoints|feedrate] [--split]");
    process::exit(2);
}

fn read_options(path: &str) -> SampleOptions {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Cannot read {}: {}", path, e);
            process::exit(2);
        }
    };
    match serde_json::from_str(&text) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Invalid options in {}: {}", path, e);
            process::exit(2);
        }
    }
}

fn main() {
    gtrace::init_logging();
    let mut options_file = None;
    let mut density = None;
    let mut scale = None;
    let mut filename = None;
    let mut split = false;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--split" => split = true,
            "--options" => options_file = Some(args.next().unwrap_or_else(|| usage())),
            "--density" => density = Some(args.next().and_then(|n| n.parse().ok())
                                          .unwrap_or_else(|| usage())),
            "--scale" => scale = Some(args.next().and_then(|s| s.parse::<ColorScale>().ok())
                                      .unwrap_or_else(|| usage())),
            _ => filename = Some(arg),
        }
    }
    // flags take precedence over the options file
    let mut options = options_file.map_or_else(SampleOptions::default, |path| read_options(&path));
    if let Some(density) = density {
        options.density = density;
    }
    if let Some(scale) = scale {
        options.scale = scale;
    }
    let filename = filename.unwrap_or_else(|| usage());
    let input = match fs::read_to_string(&filename) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Cannot read {}: {}", filename, e);
            process::exit(2);
        }
    };
    debug!("sampling {} with {:?}", filename, options);

    let points = match gtrace::trace(&input, &options) {
        Ok(points) => points,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let output = if split {
        let (positions, colors) = gtrace::split(&points);
        json!({ "positions": positions, "colors": colors })
    } else {
        json!(points.iter().map(|p| p.to_array().to_vec()).collect::<Vec<_>>())
    };
    println!("{}", output);
}
