// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use itertools::Itertools;
use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, trace};

use crate::ast::*;
use crate::error::{Error, Result};

#[derive(Parser)]
#[grammar = "gcode.pest"]
pub struct GcodeParser;

/// The word that turns a line into a linear move.
pub const MOTION_TRIGGER: &str = "G1";

/// Start of a line comment.  The grammar only allows it in front of the
/// comment, so the first occurrence on a valid line is the comment start.
pub const COMMENT_MARKER: char = ';';

/// Split a text into lines, numbered from 1.
fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input.lines().enumerate().map(|(n, line)| (n + 1, line))
}

/// Check a single line against the line grammar.
pub fn line_is_valid(line: &str) -> bool {
    GcodeParser::parse(Rule::line_only, line).is_ok()
}

/// Check the whole text, reporting the first line that fails the grammar.
pub fn check(input: &str) -> Result<()> {
    for (lineno, line) in numbered_lines(input) {
        if let Err(e) = GcodeParser::parse(Rule::line_only, line) {
            return Err(Error::InvalidGrammar {
                lineno,
                line: line.into(),
                source: Box::new(e.with_path(&format!("line {}", lineno))),
            });
        }
    }
    Ok(())
}

/// Returns true if every line of the text is empty or matches the grammar.
pub fn validate(input: &str) -> bool {
    check(input).is_ok()
}

/// Validate the text, then drop comments and blank lines.
///
/// Fails with `Error::InvalidGrammar` without processing anything if a line
/// is invalid.
pub fn strip_comments(input: &str) -> Result<Program> {
    check(input)?;
    debug!("Delete comments from text");
    let mut prog = Program::default();
    for (lineno, line) in numbered_lines(input) {
        let code = match line.find(COMMENT_MARKER) {
            Some(pos) => &line[..pos],
            None => line,
        };
        let text = code.trim();
        if !text.is_empty() {
            prog.blocks.push(Block { lineno, text });
        }
    }
    trace!("{} blocks left after removing comments", prog.blocks.len());
    Ok(prog)
}

/// Returns true for an axis or feed word such as `X-1.5` or `F300`.
pub fn is_motion_word(token: &str) -> bool {
    GcodeParser::parse(Rule::motion_word_only, token).is_ok()
}

/// Split an axis or feed word into its field and numeric value.
pub fn parse_motion_word(lineno: usize, token: &str) -> Result<(Field, f64)> {
    let malformed = || Error::MalformedNumericToken { lineno, token: token.into() };
    let mut pairs = GcodeParser::parse(Rule::motion_word_only, token).map_err(|_| malformed())?;
    // motion_word_only -> motion_word -> (axis_letter, number)
    let word = pairs.next().and_then(|p| p.into_inner().next()).ok_or_else(malformed)?;
    let (letter, number) = word.into_inner().collect_tuple().ok_or_else(malformed)?;
    let field = letter.as_str().chars().next().and_then(Field::from_letter).ok_or_else(malformed)?;
    let value: f64 = number.as_str().parse().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }
    Ok((field, value))
}

/// Collect the coordinate and feed words that follow `G1` on each line.
///
/// The motion flag is reset on every line, so lines without their own `G1`
/// contribute nothing.  Lines that yield no words are left out.
pub fn extract_motion_groups<'a>(prog: &Program<'a>) -> Vec<MotionGroup<'a>> {
    debug!("Get coordinates from text");
    let mut groups = vec![];
    for block in &prog.blocks {
        let mut in_motion = false;
        let mut words = vec![];
        for token in block.tokens() {
            if token == MOTION_TRIGGER {
                in_motion = true;
            }
            if in_motion && is_motion_word(token) {
                words.push(token);
            }
        }
        if !words.is_empty() {
            groups.push(MotionGroup { lineno: block.lineno, words });
        }
    }
    trace!("{} motion lines found", groups.len());
    groups
}
