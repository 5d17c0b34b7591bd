// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use gtrace::ast::{Field, MotionGroup};
use gtrace::gradient::{gradient, MAX_COLOR, MIN_COLOR};
use gtrace::parse;
use gtrace::sample::{sample, SampleOptions, Trace, DEFAULT_DENSITY};
use gtrace::Error;
use proptest::prelude::*;

fn trace_of(src: &str) -> Trace {
    let prog = parse::strip_comments(src).unwrap();
    Trace::resolve(&parse::extract_motion_groups(&prog)).unwrap()
}

#[test]
fn test_single_segment() {
    let points = gtrace::trace("G1 X0 F0\nG1 X10 F100", &SampleOptions::default()).unwrap();
    assert_eq!(points.len(), DEFAULT_DENSITY);

    assert_eq!(points[0].position, [0., 0., 0.]);
    for pair in points.windows(2) {
        assert!(pair[1].position[0] > pair[0].position[0]);
        assert!(pair[1].position[0] < 10.);
    }
    assert_eq!(points[50].position[0], 5.);

    let colors = gradient(MIN_COLOR, MAX_COLOR, DEFAULT_DENSITY + 1);
    assert_eq!(points[0].color, MIN_COLOR);
    for (point, color) in points.iter().zip(&colors) {
        assert_eq!(&point.color, color);
    }
}

#[test]
fn test_move_without_x_delta() {
    let points = gtrace::trace("G1 X0 Y0 F0\nG1 Y5 F50", &SampleOptions::default()).unwrap();
    assert_eq!(points.len(), DEFAULT_DENSITY);
    assert!(points.iter().all(|p| p.position[0] == 0.));
    assert_eq!(points[0].position[1], 0.);
    for pair in points.windows(2) {
        assert!(pair[1].position[1] > pair[0].position[1]);
        assert!(pair[1].position[1] < 5.);
    }
}

#[test]
fn test_carry_forward() {
    let trace = trace_of("G1 X1 F10\nG1 Y2\nG1 X3");
    let states = trace.states();
    assert_eq!(states[2][Field::Y], states[1][Field::Y]);
    assert_eq!(states[2][Field::F], states[0][Field::F]);
}

#[test]
fn test_normalization() {
    let trace = trace_of("G1 X-5 Y10 Z3 F200\nG1 X5 Y12 F400\nG1 Z-1 F300");
    for field in &[Field::X, Field::Y, Field::Z, Field::F] {
        let min = trace.states().iter().map(|s| s[*field]).fold(f64::INFINITY, f64::min);
        assert_eq!(min, 0., "field {}", field);
    }
    assert_eq!(trace.states()[1].x, 10.);
    assert_eq!(trace.states()[2].f, 100.);
}

#[test]
fn test_missing_data() {
    let run = |src| gtrace::trace(src, &SampleOptions::default());
    assert!(matches!(run("G1 X1\nG1 X2"), Err(Error::MissingFeedrate)));
    assert!(matches!(run("G1 F100\nG1 F200"), Err(Error::MissingCoordinates)));
    // F-only lines without G1 are not motion lines
    assert!(matches!(run("F100\nG1 X1\nG1 X2"), Err(Error::MissingFeedrate)));
    assert!(matches!(run("; nothing to see"), Err(Error::MissingFeedrate)));
}

#[test]
fn test_malformed_token() {
    let groups = [MotionGroup { lineno: 3, words: vec!["X1", "F1e400"] }];
    match sample(&groups, &SampleOptions::default()) {
        Err(Error::MalformedNumericToken { lineno, token }) => {
            assert_eq!(lineno, 3);
            assert_eq!(token, "F1e400");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_single_state_has_no_points() {
    let points = gtrace::trace("G1 X1 F100", &SampleOptions::default()).unwrap();
    assert!(points.is_empty());
}

#[test]
fn test_segments_can_be_cut_short() {
    let trace = trace_of("G1 X0 F10\nG1 X1 F20\nG1 X2 F30\nG1 X3 F40");
    let options = SampleOptions { density: 10, ..Default::default() };
    assert_eq!(trace.len(), 3);
    let mut segments = trace.segments(&options);
    let first = segments.next().unwrap();
    assert_eq!(first.len(), 10);
    drop(segments);
    assert_eq!(trace.points(&options).len(), 30);
    assert_eq!(trace.points(&options)[..10], first[..]);
}

#[test]
fn test_split() {
    let options = SampleOptions { density: 5, ..Default::default() };
    let points = gtrace::trace("G1 X0 Y0 F0\nG1 X1 Y1 F10", &options).unwrap();
    let (positions, colors) = gtrace::split(&points);
    assert_eq!(positions.len(), 5);
    assert_eq!(colors.len(), 5);
    assert_eq!(positions[4], [0.8, 0.8, 0.]);
    assert_eq!(colors[0], MIN_COLOR);
    assert_eq!(points[4].to_array()[..3], positions[4][..]);
}

proptest! {
    #[test]
    fn gradient_stays_within_endpoints(
        start in prop::array::uniform4(0.0f64..=1.0),
        finish in prop::array::uniform4(0.0f64..=1.0),
        n in 1usize..200,
    ) {
        let stops = gradient(start, finish, n);
        prop_assert_eq!(stops.len(), n);
        prop_assert_eq!(stops[0], start);
        for stop in &stops {
            for c in 0..4 {
                prop_assert!(stop[c] >= start[c].min(finish[c]));
                prop_assert!(stop[c] <= start[c].max(finish[c]));
            }
        }
    }

    #[test]
    fn sampling_is_deterministic_and_zero_based(
        moves in prop::collection::vec((0u16..500, 0u16..500, 0u16..50, 1u16..3000), 2..8)
    ) {
        let text: Vec<String> = moves.iter()
            .map(|(x, y, z, f)| format!("G1 X{} Y{} Z{} F{}", x, y, z, f))
            .collect();
        let text = text.join("\n");
        let options = SampleOptions { density: 8, ..Default::default() };
        let first = gtrace::trace(&text, &options).unwrap();
        let second = gtrace::trace(&text, &options).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 8 * (moves.len() - 1));

        let trace = trace_of(&text);
        for field in &[Field::X, Field::Y, Field::Z, Field::F] {
            let min = trace.states().iter().map(|s| s[*field]).fold(f64::INFINITY, f64::min);
            prop_assert_eq!(min, 0.);
        }
        for point in &first {
            prop_assert!(point.color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
