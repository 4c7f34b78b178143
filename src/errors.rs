use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Contract violations raised by the Maybe type and its combinators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaybeError {
    /// A Filled value was requested for an absent payload.
    #[error("a filled maybe cannot hold an absent value")]
    AbsentPayload,

    /// The handler of a filled maybe produced an absent result.
    #[error("the filled handler cannot return an absent value")]
    AbsentResult,

    /// `single_or_empty` saw more than one element.
    #[error("expected at most one element, found {count}")]
    Cardinality { count: usize },
}

/// One failed expectation, qualified by the member path it occurred at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Error)]
pub enum EquivalencyError {
    #[error("{}", .0.iter().join("\n"))]
    Mismatches(Vec<Mismatch>),
}

impl EquivalencyError {
    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            EquivalencyError::Mismatches(m) => m,
        }
    }
}

pub type Result<T> = std::result::Result<T, EquivalencyError>;
