//! Graph-subsystem error type.

use thiserror::Error;

use cg_core::CoreError;

/// Errors produced by `cg-graph`.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("city {0:?} not found")]
    CityNotFound(String),

    #[error("no route from {from:?} to {to:?}")]
    Unreachable { from: String, to: String },

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type GraphResult<T> = Result<T, GraphError>;
