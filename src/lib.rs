// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Validation of simple G-code motion programs, and sampling of their linear
//! moves into a dense stream of colored points for visualization.
//!
//! The accepted language is deliberately small: every line is a list of
//! whitespace separated words (an uppercase letter followed by a number),
//! optionally followed by a `; ` comment.  Only `G1` lines with `X`, `Y`, `Z`
//! and `F` words contribute to the sampled path.
//!
//! ## Basic usage
//!
//! The pipeline runs in stages, each of which can be used on its own:
//!
//! * `parse::validate` / `parse::check` test the line grammar,
//! * `parse::strip_comments` returns the comment-free `ast::Program`,
//! * `parse::extract_motion_groups` collects the words of each `G1` line,
//! * `sample::Trace` resolves modal state and interpolates the segments.
//!
//! `trace` runs all of them at once:
//!
//! ```rust
//! use gtrace::sample::SampleOptions;
//!
//! let points = gtrace::trace("G1 X0 F0\nG1 X10 F100", &SampleOptions::default()).unwrap();
//! assert_eq!(points.len(), 100);
//! assert_eq!(points[0].position, [0., 0., 0.]);
//! ```
//!
//! Nothing here renders or writes files; the points are handed to whatever
//! display backend the caller uses.

pub mod ast;
pub mod error;
pub mod gradient;
pub mod parse;
pub mod sample;

// internal helpers
pub(crate) mod util;

pub use crate::error::{Error, Result};

use crate::ast::{ColorStop, SampledPoint};
use crate::sample::SampleOptions;

/// Validate, clean and sample a program, returning its point stream.
pub fn trace(input: &str, options: &SampleOptions) -> Result<Vec<SampledPoint>> {
    let prog = parse::strip_comments(input)?;
    let groups = parse::extract_motion_groups(&prog);
    sample::sample(&groups, options)
}

/// Split a point stream into separate position and color arrays.
pub fn split(points: &[SampledPoint]) -> (Vec<[f64; 3]>, Vec<ColorStop>) {
    points.iter().map(|p| (p.position, p.color)).unzip()
}

/// Install a stderr log subscriber for the command line tools.
///
/// The filter is read from `RUST_LOG` and defaults to warnings only.
pub fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    // a subscriber may already be installed, e.g. by tests
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
