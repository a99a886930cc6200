use approx::assert_relative_eq;
use ndarray::array;
use simplehist_core::{
    BinError, BinningScheme, Config, EdgeOrdering, Histogram, SimpleHistError,
};
use std::sync::Arc;

fn hundred_bins() -> Vec<f64> {
    (0..=100).map(f64::from).collect()
}

#[test]
fn basic_fill_scenario() -> anyhow::Result<()> {
    let mut h = Histogram::new(hundred_bins())?;
    assert_eq!(h.bin_count(), 100);

    h.fill(0.5);
    assert_eq!(h[0], 1.0);
    h.fill_weighted(1.0, 0.5);
    assert_eq!(h[1], 0.5);
    h.fill(100.0);
    assert_eq!(h.overflow(), 1.0);
    assert_eq!(h[99], 0.0);
    h.fill(-1.0);
    assert_eq!(h.underflow(), 1.0);
    assert_relative_eq!(h.total(), 3.5);
    Ok(())
}

#[test]
fn upper_edge_is_overflow_lower_edge_is_first_bin() -> anyhow::Result<()> {
    let mut h = Histogram::new(hundred_bins())?;
    h.fill(99.9999999);
    assert_eq!(h.overflow(), 0.0);
    assert_eq!(h[99], 1.0);
    h.fill(0.0);
    assert_eq!(h[0], 1.0);
    assert_eq!(h.underflow(), 0.0);
    Ok(())
}

#[test]
fn rebinning_discards_contents_and_flows() -> anyhow::Result<()> {
    let mut h = Histogram::new(hundred_bins())?;
    h.fill_many(&[-3.0, 5.5, 5.5, 250.0], None)?;
    assert_eq!(h[5], 2.0);

    h.set_bins(BinningScheme::uniform(0.0, 1.0, 4)?)?;
    assert_eq!(h.bin_count(), 4);
    assert_eq!(h.data(), &array![0.0, 0.0, 0.0, 0.0]);
    assert_eq!(h.underflow(), 0.0);
    assert_eq!(h.overflow(), 0.0);
    Ok(())
}

#[test]
fn arithmetic_on_filled_histograms() -> anyhow::Result<()> {
    let bins = Arc::new(BinningScheme::new(&[0.0, 1.0, 2.0, 3.0])?);
    let mut signal = Histogram::new(&bins)?;
    let mut background = Histogram::new(&bins)?;
    signal.fill_many(&[0.5, 1.5, 1.5, 2.5], None)?;
    background.fill_many(&[0.5, 0.5, 2.5], Some(&[0.5, 0.5, 1.0][..]))?;

    let combined = signal.add(&background)?;
    assert_eq!(combined.data(), &array![2.0, 2.0, 2.0]);
    assert!(Arc::ptr_eq(combined.bins(), &bins));

    let ratio = signal.divide(&combined)?;
    assert_eq!(ratio.data(), &array![0.5, 1.0, 0.5]);

    let scaled = &ratio * 4.0;
    assert_eq!(scaled.data(), &array![2.0, 4.0, 2.0]);
    assert_eq!(ratio.data(), &array![0.5, 1.0, 0.5]);
    Ok(())
}

#[test]
fn mismatched_histograms_do_not_combine() -> anyhow::Result<()> {
    let a = Histogram::new([0.0, 1.0, 2.0])?;
    let b = Histogram::new([0.0, 1.0])?;
    match a.multiply(&b) {
        Err(SimpleHistError::ShapeMismatch { left, right }) => {
            assert_eq!(left, vec![2]);
            assert_eq!(right, vec![1]);
        }
        other => panic!("expected shape mismatch, got {:?}", other),
    }
    Ok(())
}

#[test]
fn configured_strict_ordering() -> anyhow::Result<()> {
    let mut cfg = Config::default();
    cfg.binning.edge_ordering = EdgeOrdering::Strict;
    let err = BinningScheme::from_config(&[0.0, 1.0, 1.0], &cfg.binning).unwrap_err();
    assert_eq!(err, BinError::ZeroWidthBin { index: 2 });

    let permissive = BinningScheme::from_config(&[0.0, 1.0, 1.0], &Config::default().binning)?;
    let mut h = Histogram::new(permissive)?;
    h.fill(1.0);
    assert_eq!(h.overflow(), 1.0);
    assert_eq!(h.data(), &array![0.0, 0.0]);
    Ok(())
}

#[test]
fn large_batch_fill_uses_configured_threshold() -> anyhow::Result<()> {
    let mut cfg = Config::default();
    cfg.fill.parallel_fill_threshold = 16;
    let values: Vec<f64> = (0..1000).map(|i| f64::from(i) / 10.0 - 1.0).collect();

    let mut h = Histogram::new(hundred_bins())?.with_fill_config(cfg.fill.clone());
    h.fill_many(&values, None)?;
    assert_eq!(h.underflow(), 10.0);
    assert_eq!(h.overflow(), 0.0);
    assert_relative_eq!(h.sum(), 990.0);
    Ok(())
}
