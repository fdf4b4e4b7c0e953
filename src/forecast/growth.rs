//! Compound annual growth rate of a historical series

use log::warn;

/// Constant per-period rate carrying the first valid observation to the last
///
/// Blank (`None`) and NaN cells are discarded first. Fewer than two valid
/// values, or a first valid value of exactly zero, give a rate of 0.0.
///
/// When the endpoints differ in sign the root is taken of a negative ratio:
/// over a single interval the rate is simply `ratio - 1` (`[100, -50]` gives -1.5),
/// over more intervals the root has no real value and the rate is NaN.
pub fn compound_growth_rate(series: &[Option<f64>]) -> f64 {
    let valid: Vec<f64> = series
        .iter()
        .flatten()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();

    let (first, last) = match (valid.first(), valid.last()) {
        (Some(&first), Some(&last)) if valid.len() >= 2 => (first, last),
        _ => return 0.0,
    };
    if first == 0.0 {
        return 0.0;
    }

    let intervals = (valid.len() - 1) as f64;
    let ratio = last / first;
    if ratio < 0.0 && valid.len() > 2 {
        warn!(
            "Series changes sign ({} -> {}); growth rate is undefined",
            first, last
        );
    }
    ratio.powf(1.0 / intervals) - 1.0
}

/// [`compound_growth_rate`] over plain values, treating NaN as missing
pub fn compound_growth_rate_of(values: &[f64]) -> f64 {
    let cells: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    compound_growth_rate(&cells)
}
