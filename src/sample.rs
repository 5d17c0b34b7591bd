// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Turning motion groups into a dense, colored point stream.
//!
//! Sampling runs in two steps.  [`Trace::resolve`] fills in omitted words
//! from the modal state of earlier lines and shifts every field so that its
//! document-wide minimum becomes zero.  [`Trace::segments`] then walks pairs
//! of consecutive states and interpolates `density` points per pair, coloring
//! them by how the feedrate changes.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};
use tracing::{debug, trace};

use crate::ast::*;
use crate::error::{Error, Result};
use crate::gradient::{gradient, MAX_COLOR, MIN_COLOR};
use crate::parse::parse_motion_word;
use crate::util::num_to_index;

/// Points generated per segment unless configured otherwise.
pub const DEFAULT_DENSITY: usize = 100;

/// Upper bound for the palette used by `ColorScale::Feedrate`.
const MAX_PALETTE: usize = 1024;

/// How segment colors are derived from the feedrate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Accelerating segments fade from the min to the max color, braking
    /// segments the other way round; constant feed keeps the last color.
    Endpoints,
    /// Every state gets a color proportional to its feedrate, and segments
    /// fade between the colors of their endpoints.
    Feedrate,
}

impl Default for ColorScale {
    fn default() -> Self {
        ColorScale::Endpoints
    }
}

/// Settings for one sampling run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    /// Number of points per segment; zero is treated as one.
    pub density: usize,
    pub min_color: ColorStop,
    pub max_color: ColorStop,
    pub scale: ColorScale,
}

impl Default for SampleOptions {
    fn default() -> Self {
        SampleOptions {
            density: DEFAULT_DENSITY,
            min_color: MIN_COLOR,
            max_color: MAX_COLOR,
            scale: ColorScale::default(),
        }
    }
}

/// Fully resolved and normalized motion states of one document.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    states: Vec<State>,
    max_feed: f64,
}

impl Trace {
    /// Resolve modal state for every group, backfill fields that are not
    /// known yet, and normalize against the document-wide minimum.
    pub fn resolve(groups: &[MotionGroup]) -> Result<Trace> {
        // carry-forward pass
        let mut current = ModalState::default();
        let mut bounds = ModalState::default();
        let mut resolved = Vec::with_capacity(groups.len());
        for group in groups {
            for word in &group.words {
                let (field, value) = parse_motion_word(group.lineno, word)?;
                current[field] = Some(value);
                bounds[field] = Some(bounds[field].map_or(value, |min| min.min(value)));
            }
            resolved.push(current);
        }

        if bounds[Field::F].is_none() {
            return Err(Error::MissingFeedrate);
        }
        if bounds[Field::X].is_none() && bounds[Field::Y].is_none() && bounds[Field::Z].is_none() {
            return Err(Error::MissingCoordinates);
        }

        // Fields used before their first appearance are backfilled with twice
        // the minimum, which normalizes to the minimum itself.  Axes that
        // never appear at all stay at zero.
        let mut states = Vec::with_capacity(resolved.len());
        for modal in &resolved {
            let mut state = State::default();
            for field in Field::iter() {
                let min = bounds[field].unwrap_or(0.);
                state[field] = modal[field].unwrap_or(2. * min) - min;
            }
            states.push(state);
        }

        let max_feed = states.iter().map(|s| s.f).fold(0., f64::max);
        trace!("resolved {} states, max normalized feedrate {}", states.len(), max_feed);
        Ok(Trace { states, max_feed })
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Number of segments, i.e. pairs of consecutive states.
    pub fn len(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the sampled points of each segment in order.
    ///
    /// Every iterator starts with fresh color state, so it can be dropped
    /// between segments to cancel a run.
    pub fn segments<'a>(&'a self, options: &'a SampleOptions) -> Segments<'a> {
        let palette = match options.scale {
            ColorScale::Endpoints => None,
            ColorScale::Feedrate => {
                let size = num_to_index(self.max_feed, MAX_PALETTE - 1) + 1;
                Some(gradient(options.min_color, options.max_color, size))
            }
        };
        Segments {
            states: &self.states,
            next: 0,
            options,
            max_feed: self.max_feed,
            palette,
            current_feed: 0.,
            current_color: None,
        }
    }

    /// All sampled points, concatenated in segment order.
    pub fn points(&self, options: &SampleOptions) -> Vec<SampledPoint> {
        debug!("Generate dots to draw");
        let mut points = Vec::with_capacity(self.len() * options.density.max(1));
        for segment in self.segments(options) {
            points.extend(segment);
        }
        debug!("{} dots to draw", points.len());
        points
    }
}

/// Iterator over the per-segment point batches of a `Trace`.
pub struct Segments<'a> {
    states: &'a [State],
    next: usize,
    options: &'a SampleOptions,
    max_feed: f64,
    palette: Option<Vec<ColorStop>>,
    current_feed: f64,
    current_color: Option<ColorStop>,
}

impl<'a> Segments<'a> {
    fn endpoint_colors(&self, from: &State, to: &State) -> (ColorStop, ColorStop) {
        let (lo, hi) = (self.options.min_color, self.options.max_color);
        if let Some(palette) = &self.palette {
            let last = palette.len() - 1;
            let color = |feed: f64| if self.max_feed > 0. {
                palette[num_to_index(feed / self.max_feed * last as f64, last)]
            } else {
                palette[0]
            };
            return (color(from.f), color(to.f));
        }
        if self.current_feed == 0. {
            (lo, if to.f > from.f { hi } else { lo })
        } else if to.f > from.f {
            (lo, hi)
        } else if to.f < from.f {
            (hi, lo)
        } else {
            let color = self.current_color.unwrap_or(lo);
            (color, color)
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Vec<SampledPoint>;

    fn next(&mut self) -> Option<Vec<SampledPoint>> {
        let from = *self.states.get(self.next)?;
        let to = *self.states.get(self.next + 1)?;
        self.next += 1;

        let (start, finish) = self.endpoint_colors(&from, &to);
        self.current_feed = to.f;
        self.current_color = Some(finish);

        // Parametrized by step index, so segments without movement on
        // some (or all) axes are fine.
        let steps = self.options.density.max(1);
        let colors = gradient(start, finish, steps + 1);
        let (p1, p2) = (from.position(), to.position());
        let points = colors.iter().take(steps).enumerate().map(|(i, &color)| {
            let t = i as f64 / steps as f64;
            let mut position = [0.; 3];
            for (c, value) in position.iter_mut().enumerate() {
                *value = p1[c] + t * (p2[c] - p1[c]);
            }
            SampledPoint { position, color }
        }).collect();
        Some(points)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.states.len().saturating_sub(self.next + 1);
        (left, Some(left))
    }
}

/// Resolve and sample motion groups in one go.
pub fn sample(groups: &[MotionGroup], options: &SampleOptions) -> Result<Vec<SampledPoint>> {
    Ok(Trace::resolve(groups)?.points(options))
}
