// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use thiserror::Error;

use crate::parse::Rule;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid g-code in line {lineno}: {line:?}")]
    InvalidGrammar {
        lineno: usize,
        line: String,
        #[source]
        source: Box<pest::error::Error<Rule>>,
    },
    #[error("No feedrate given anywhere in the program")]
    MissingFeedrate,
    #[error("No X, Y or Z coordinate given anywhere in the program")]
    MissingCoordinates,
    #[error("Malformed numeric word {token:?} in line {lineno}")]
    MalformedNumericToken { lineno: usize, token: String },
}
