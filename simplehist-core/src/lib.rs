pub mod binning;
pub mod element;
pub mod hist;
pub mod ops;

pub use binning::{search_bins, BinLocation, BinningScheme};
pub use element::Element;
pub use hist::{Histogram, IntoBinning};
pub use ops::BinaryOp;
pub use simplehist_common::{
    BinError, BinningConfig, Config, EdgeOrdering, FillConfig, Result, SimpleHistError,
};
