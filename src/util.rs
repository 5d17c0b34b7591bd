// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


/// Round a floating number to the given number of decimal places.
pub fn round_to(inp: f64, figures: i32) -> f64 {
    let scale = 10f64.powi(figures);
    let v = (inp * scale).round() / scale;
    // avoid handing out -0.0 for tiny negative inputs
    if v == 0. { 0. } else { v }
}

/// Helper for converting a non-negative float to an index, clamped to `max`.
pub fn num_to_index(inp: f64, max: usize) -> usize {
    if inp.is_nan() || inp <= 0. {
        0
    } else {
        (inp.round() as usize).min(max)
    }
}
