use crate::binning::{BinLocation, BinningScheme};
use crate::element::Element;
use log::{debug, trace, warn};
use ndarray::{Array1, ArrayViewMut1};
use num_traits::NumCast;
use rayon::prelude::*;
use simplehist_common::{BinError, FillConfig, Result, SimpleHistError};
use std::ops::Index;
use std::sync::Arc;

/// Anything a histogram axis can be built from.
pub trait IntoBinning {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError>;
}

impl IntoBinning for Arc<BinningScheme> {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError> {
        Ok(self)
    }
}

impl IntoBinning for &Arc<BinningScheme> {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError> {
        Ok(Arc::clone(self))
    }
}

impl IntoBinning for BinningScheme {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError> {
        Ok(Arc::new(self))
    }
}

impl IntoBinning for &[f64] {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError> {
        BinningScheme::new(self).map(Arc::new)
    }
}

impl IntoBinning for Vec<f64> {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError> {
        self.as_slice().into_binning()
    }
}

impl IntoBinning for &Vec<f64> {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError> {
        self.as_slice().into_binning()
    }
}

impl<const N: usize> IntoBinning for [f64; N] {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError> {
        self.as_slice().into_binning()
    }
}

impl<const N: usize> IntoBinning for &[f64; N] {
    fn into_binning(self) -> std::result::Result<Arc<BinningScheme>, BinError> {
        self.as_slice().into_binning()
    }
}

/// A one-dimensional histogram with under/overflow counters.
///
/// `data` always has exactly one element per bin. Replacing the data or the
/// bins starts a new fill session, so both flow counters go back to zero.
/// Bin contents are read through [`Index`] or [`Histogram::get`]; writes go
/// through [`Histogram::data_mut`], which can't change the length.
#[derive(Debug, Clone)]
pub struct Histogram<T = f64> {
    bins: Arc<BinningScheme>,
    data: Array1<T>,
    underflow: f64,
    overflow: f64,
    fill_config: FillConfig,
}

impl Histogram<f64> {
    pub fn new(bins: impl IntoBinning) -> Result<Self> {
        Self::zeros(bins)
    }
}

impl<T: Element> Histogram<T> {
    pub fn zeros(bins: impl IntoBinning) -> Result<Self> {
        let bins = bins.into_binning()?;
        let data = Array1::zeros(bins.bin_count());
        Ok(Self::from_parts(bins, data))
    }

    /// Wraps existing bin contents; the element type is kept as given.
    pub fn with_data(bins: impl IntoBinning, data: impl Into<Array1<T>>) -> Result<Self> {
        let bins = bins.into_binning()?;
        let data = data.into();
        check_data_len(&bins, &data)?;
        Ok(Self::from_parts(bins, data))
    }

    pub(crate) fn from_parts(bins: Arc<BinningScheme>, data: Array1<T>) -> Self {
        Self {
            bins,
            data,
            underflow: 0.0,
            overflow: 0.0,
            fill_config: FillConfig::default(),
        }
    }

    /// Copy of `self` around new data: same bins and fill config, fresh flows.
    pub(crate) fn rewrap(&self, data: Array1<T>) -> Self {
        Self {
            fill_config: self.fill_config.clone(),
            ..Self::from_parts(Arc::clone(&self.bins), data)
        }
    }

    pub fn with_fill_config(mut self, fill_config: FillConfig) -> Self {
        self.fill_config = fill_config;
        self
    }

    pub fn fill_config(&self) -> &FillConfig {
        &self.fill_config
    }

    pub fn bins(&self) -> &Arc<BinningScheme> {
        &self.bins
    }

    pub fn bin_count(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &Array1<T> {
        &self.data
    }

    pub fn data_mut(&mut self) -> ArrayViewMut1<'_, T> {
        self.data.view_mut()
    }

    pub fn into_data(self) -> Array1<T> {
        self.data
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.data.get(index).copied()
    }

    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    pub fn set_underflow(&mut self, underflow: f64) {
        self.underflow = underflow;
    }

    pub fn set_overflow(&mut self, overflow: f64) {
        self.overflow = overflow;
    }

    /// Swaps in a new axis. The old contents are dropped and every bin
    /// starts at zero.
    pub fn set_bins(&mut self, bins: impl IntoBinning) -> Result<()> {
        let bins = bins.into_binning()?;
        debug!(
            "rebinning histogram: {} -> {} bins",
            self.bin_count(),
            bins.bin_count()
        );
        self.data = Array1::zeros(bins.bin_count());
        self.bins = bins;
        self.reset_flows();
        Ok(())
    }

    pub fn set_data(&mut self, data: impl Into<Array1<T>>) -> Result<()> {
        let data = data.into();
        check_data_len(&self.bins, &data)?;
        debug!("replacing histogram data ({} bins)", data.len());
        self.data = data;
        self.reset_flows();
        Ok(())
    }

    fn reset_flows(&mut self) {
        self.underflow = 0.0;
        self.overflow = 0.0;
    }

    pub fn fill(&mut self, value: f64) {
        self.fill_weighted(value, 1.0);
    }

    pub fn fill_weighted(&mut self, value: f64, weight: f64) {
        let location = self.bins.locate(value);
        self.accumulate(location, weight);
    }

    /// Fills every value in `values`, with matching `weights` if given.
    /// Large batches look their bins up in parallel; the additions always
    /// happen in input order.
    pub fn fill_many(&mut self, values: &[f64], weights: Option<&[f64]>) -> Result<()> {
        if let Some(w) = weights {
            if w.len() != values.len() {
                return Err(SimpleHistError::ShapeMismatch {
                    left: vec![values.len()],
                    right: vec![w.len()],
                });
            }
        }
        let weight_at = |i: usize| weights.map_or(1.0, |w| w[i]);
        if values.len() >= self.fill_config.parallel_fill_threshold {
            trace!("locating {} values in parallel", values.len());
            let bins = &self.bins;
            let locations: Vec<BinLocation> = values.par_iter().map(|&v| bins.locate(v)).collect();
            for (i, location) in locations.into_iter().enumerate() {
                self.accumulate(location, weight_at(i));
            }
        } else {
            trace!("filling {} values sequentially", values.len());
            for (i, &v) in values.iter().enumerate() {
                self.fill_weighted(v, weight_at(i));
            }
        }
        Ok(())
    }

    fn accumulate(&mut self, location: BinLocation, weight: f64) {
        match location {
            BinLocation::Underflow => self.underflow += weight,
            BinLocation::Overflow => self.overflow += weight,
            BinLocation::Bin(index) => self.add_to_bin(index, weight),
        }
    }

    // The sum is formed in f64 and cast back, which truncates toward zero
    // for integer storage.
    fn add_to_bin(&mut self, index: usize, weight: f64) {
        let slot = &mut self.data[index];
        match slot
            .to_f64()
            .and_then(|current| <T as NumCast>::from(current + weight))
        {
            Some(summed) => *slot = summed,
            None => warn!(
                "weight {} cannot be stored in bin {} ({:?}); bin left unchanged",
                weight, index, *slot
            ),
        }
    }

    /// Sum of bin contents, flows excluded. Wraps for integer storage.
    pub fn sum(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| acc.wrapping_add(x))
    }

    /// Sum of bin contents plus both flows.
    pub fn total(&self) -> f64 {
        self.sum().to_f64().unwrap_or(f64::NAN) + self.underflow + self.overflow
    }
}

impl<T> Index<usize> for Histogram<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

fn check_data_len<T>(bins: &BinningScheme, data: &Array1<T>) -> Result<()> {
    if data.len() != bins.bin_count() {
        return Err(BinError::DataLength {
            expected: bins.bin_count(),
            found: data.len(),
        }
        .into());
    }
    Ok(())
}
