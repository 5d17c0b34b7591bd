// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Formatter};
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A validated program with all comments and blank lines removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program<'a> {
    pub blocks: Vec<Block<'a>>,
}

/// One non-empty, comment-free line of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// 1-based line number in the source text.
    pub lineno: usize,
    pub text: &'a str,
}

impl<'a> Block<'a> {
    pub fn tokens(&self) -> impl Iterator<Item = &'a str> {
        self.text.split_whitespace()
    }
}

/// The coordinate and feed words of one linear move line, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionGroup<'a> {
    pub lineno: usize,
    pub words: Vec<&'a str>,
}

/// A modal field tracked by the sampler.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter)]
pub enum Field {
    X,
    Y,
    Z,
    F,
}

impl Field {
    pub fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            'X' => Field::X,
            'Y' => Field::Y,
            'Z' => Field::Z,
            'F' => Field::F,
            _ => return None,
        })
    }

    fn slot(self) -> usize {
        match self {
            Field::X => 0,
            Field::Y => 1,
            Field::Z => 2,
            Field::F => 3,
        }
    }
}

/// Modal machine state: position on three linear axes plus the feedrate.
///
/// Fields are `None` until the first line that mentions them.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ModalState {
    values: [Option<f64>; 4],
}

impl Index<Field> for ModalState {
    type Output = Option<f64>;

    fn index(&self, field: Field) -> &Option<f64> {
        &self.values[field.slot()]
    }
}

impl IndexMut<Field> for ModalState {
    fn index_mut(&mut self, field: Field) -> &mut Option<f64> {
        &mut self.values[field.slot()]
    }
}

/// A fully resolved state, the endpoint of a segment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub f: f64,
}

impl State {
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Index<Field> for State {
    type Output = f64;

    fn index(&self, field: Field) -> &f64 {
        match field {
            Field::X => &self.x,
            Field::Y => &self.y,
            Field::Z => &self.z,
            Field::F => &self.f,
        }
    }
}

impl IndexMut<Field> for State {
    fn index_mut(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::X => &mut self.x,
            Field::Y => &mut self.y,
            Field::Z => &mut self.z,
            Field::F => &mut self.f,
        }
    }
}

/// An RGBA color with all channels in `[0, 1]`.
pub type ColorStop = [f64; 4];

/// A sampled position with its color, ready for a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledPoint {
    pub position: [f64; 3],
    pub color: ColorStop,
}

impl SampledPoint {
    /// The flat `(x, y, z, r, g, b, a)` form.
    pub fn to_array(&self) -> [f64; 7] {
        let [x, y, z] = self.position;
        let [r, g, b, a] = self.color;
        [x, y, z, r, g, b, a]
    }
}

impl<'a> fmt::Display for Program<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for Block<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl<'a> fmt::Display for MotionGroup<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "X{} Y{} Z{} F{}", self.x, self.y, self.z, self.f)
    }
}
