use std::{env, fs, process};
use tracing::error;

use gtrace::parse::strip_comments;

fn main() {
    gtrace::init_logging();
    let mut filename = None;
    let mut strip = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--strip" => strip = true,
            _ => filename = Some(arg),
        }
    }
    let filename = match filename {
        Some(f) => f,
        None => {
            eprintln!("usage: gtrace-check FILE [--strip]");
            process::exit(2);
        }
    };
    let input = match fs::read_to_string(&filename) {
        Ok(input) => input,
        Err(e) => {
            error!("cannot read {}: {}", filename, e);
            eprintln!("Cannot read {}: {}", filename, e);
            process::exit(2);
        }
    };

    match strip_comments(&input) {
        Err(e) => {
            eprintln!("Invalid G-code: {}", e);
            process::exit(1);
        }
        Ok(prog) if strip => println!("{}", prog),
        Ok(_) => println!("Valid G-code"),
    }
}
