pub mod config;
pub use config::{BinningConfig, Config, EdgeOrdering, FillConfig};

use thiserror::Error;

/// Reasons an axis, or data laid out against an axis, is not a valid binning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BinError {
    #[error("must provide more than one edge to define a bin")]
    SingleEdge,
    #[error("bins must be numerically ascending (edge {index} is out of order)")]
    NotAscending { index: usize },
    #[error("edge {index} repeats the previous edge, giving a zero-width bin")]
    ZeroWidthBin { index: usize },
    #[error("data has {found} elements but the binning has {expected} bins")]
    DataLength { expected: usize, found: usize },
    #[error("cannot split [{low}, {high}) into {bins} bins")]
    InvalidRange { low: f64, high: f64, bins: usize },
}

#[derive(Error, Debug)]
pub enum SimpleHistError {
    #[error("Bin error: {0}")]
    Bin(#[from] BinError),
    #[error("Shape mismatch: left operand has shape {left:?}, right has {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SimpleHistError>;
