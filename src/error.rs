use std::backtrace::Backtrace;

use crate::puzzle::RegionKind;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Problems detected while constructing a board from a puzzle definition.
/// These surface before any search begins and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("board has an odd number of cells ({0}), dominoes cannot tile it")]
    OddCellCount(usize),

    #[error("cell ({row}, {col}) is claimed by more than one region")]
    DuplicateCell { row: i32, col: i32 },

    #[error("region {region} references out-of-range cell ({row}, {col})")]
    OutOfRangeCell { region: usize, row: i32, col: i32 },

    #[error("region {region} has kind {kind:?} but no target")]
    MissingTarget { region: usize, kind: RegionKind },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<ValidationError>,
        backtrace: Box<Backtrace>,
    },
}

impl Error {
    /// The validation failure behind this error.
    pub fn validation(&self) -> &ValidationError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(inner: ValidationError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
