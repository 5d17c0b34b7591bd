// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Linear color gradients between two RGBA colors.

use crate::ast::ColorStop;
use crate::util::round_to;

/// Color of the slowest feed (blue).
pub const MIN_COLOR: ColorStop = [0.0, 0.0, 1.0, 1.0];
/// Color of the fastest feed (red).
pub const MAX_COLOR: ColorStop = [1.0, 0.0, 0.0, 1.0];

/// Decimal places kept for every channel.
const FIGURES: i32 = 2;

/// Returns `n` colors equally spaced from `start` to `finish`, both included.
///
/// Channels are interpolated linearly and rounded to two decimal places.
/// For `n <= 1` only `start` is returned.
pub fn gradient(start: ColorStop, finish: ColorStop, n: usize) -> Vec<ColorStop> {
    let mut stops = Vec::with_capacity(n.max(1));
    stops.push(start);
    for t in 1..n {
        let frac = t as f64 / (n - 1) as f64;
        let mut stop = [0.; 4];
        for (c, value) in stop.iter_mut().enumerate() {
            let v = round_to(start[c] + frac * (finish[c] - start[c]), FIGURES);
            // rounding must not leave the range spanned by the endpoints
            let (lo, hi) = if start[c] <= finish[c] {
                (start[c], finish[c])
            } else {
                (finish[c], start[c])
            };
            *value = v.max(lo).min(hi);
        }
        stops.push(stop);
    }
    stops
}

/// Convert an 8-bit RGB triple to a color stop with the given alpha.
pub fn rgb_to_gl(rgb: [u8; 3], alpha: f64) -> ColorStop {
    let [r, g, b] = rgb;
    let channel = |v: u8| round_to(v as f64 / 255., FIGURES);
    [channel(r), channel(g), channel(b), alpha.max(0.).min(1.)]
}
