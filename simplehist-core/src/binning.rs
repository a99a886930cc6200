//! One-dimensional binning schemes and bin lookup.
//!
//! A [`BinningScheme`] is an ordered, frozen list of bin edges. `n` edges
//! describe `n - 1` bins, each half-open `[edges[i], edges[i + 1])`. An empty
//! edge list is the only way to describe zero bins; a single edge is an error.

use simplehist_common::{BinError, BinningConfig, EdgeOrdering};
use std::ops::Index;

/// Where a value falls relative to an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinLocation {
    Underflow,
    Bin(usize),
    Overflow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinningScheme {
    edges: Box<[f64]>,
}

impl BinningScheme {
    /// Builds a scheme from non-decreasing edges. Equal adjacent edges are
    /// accepted and give zero-width bins.
    pub fn new(edges: &[f64]) -> Result<Self, BinError> {
        Self::with_ordering(edges, EdgeOrdering::Permissive)
    }

    pub fn with_ordering(edges: &[f64], ordering: EdgeOrdering) -> Result<Self, BinError> {
        if edges.len() == 1 {
            return Err(BinError::SingleEdge);
        }
        for (i, pair) in edges.windows(2).enumerate() {
            // written as a negation so NaN edges are rejected too
            if !(pair[0] <= pair[1]) {
                return Err(BinError::NotAscending { index: i + 1 });
            }
            if ordering == EdgeOrdering::Strict && pair[0] == pair[1] {
                return Err(BinError::ZeroWidthBin { index: i + 1 });
            }
        }
        Ok(Self {
            edges: edges.into(),
        })
    }

    pub fn from_config(edges: &[f64], config: &BinningConfig) -> Result<Self, BinError> {
        Self::with_ordering(edges, config.edge_ordering)
    }

    /// `bins` equal-width bins spanning `[low, high)`.
    pub fn uniform(low: f64, high: f64, bins: usize) -> Result<Self, BinError> {
        if bins == 0 || !low.is_finite() || !high.is_finite() || high <= low {
            return Err(BinError::InvalidRange { low, high, bins });
        }
        let width = (high - low) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| low + i as f64 * width).collect();
        edges.push(high);
        Self::with_ordering(&edges, EdgeOrdering::Strict)
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.bin_count()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge at `index`; negative indices count back from the last edge.
    pub fn edge(&self, index: isize) -> Option<f64> {
        let i = if index < 0 {
            self.edges.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        self.edges.get(i).copied()
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn lowedges(&self) -> &[f64] {
        match self.edges.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn highedges(&self) -> &[f64] {
        match self.edges.split_first() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|w| w[0] + (w[1] - w[0]) / 2.0)
            .collect()
    }

    pub fn widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| w[1] - w[0]).collect()
    }

    pub fn first_edge(&self) -> Option<f64> {
        self.edges.first().copied()
    }

    pub fn last_edge(&self) -> Option<f64> {
        self.edges.last().copied()
    }

    /// The first edge belongs to the first bin; the last edge is overflow.
    /// NaN, and anything on an axis with no bins, counts as overflow.
    pub fn locate(&self, value: f64) -> BinLocation {
        let (first, last) = match (self.first_edge(), self.last_edge()) {
            (Some(first), Some(last)) => (first, last),
            _ => return BinLocation::Overflow,
        };
        if value < first {
            BinLocation::Underflow
        } else if value >= last || value.is_nan() {
            BinLocation::Overflow
        } else {
            BinLocation::Bin(search_bins(value, &self.edges))
        }
    }
}

impl Index<usize> for BinningScheme {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.edges[index]
    }
}

impl TryFrom<Vec<f64>> for BinningScheme {
    type Error = BinError;

    fn try_from(edges: Vec<f64>) -> Result<Self, BinError> {
        Self::new(&edges)
    }
}

impl TryFrom<&[f64]> for BinningScheme {
    type Error = BinError;

    fn try_from(edges: &[f64]) -> Result<Self, BinError> {
        Self::new(edges)
    }
}

/// Index of the bin in `edges` containing `value`, by bisection.
///
/// Callers must have checked `edges[0] <= value < edges[edges.len() - 1]`
/// and that there are at least two edges. Ties on an edge go to the upper
/// side, so a value sitting on a repeated edge lands in the last bin that
/// starts there.
pub fn search_bins(value: f64, edges: &[f64]) -> usize {
    debug_assert!(edges.len() >= 2, "need at least one bin to search");
    let mut low = 0;
    let mut high = edges.len() - 1;
    while high - low > 1 {
        let central = low + (high - low) / 2;
        if edges[central] > value {
            high = central;
        } else {
            low = central;
        }
    }
    low
}
