use crate::indicators::Indicator;
use crate::models::MergedRow;

/// Min-max scale `values` to `[0, 1]`, optionally inverted (`1 - x`).
///
/// When the column has no values or all values are equal the result is
/// entirely missing.
pub fn min_max(values: &[Option<f64>], invert: bool) -> Vec<Option<f64>> {
    let (lo, hi) = values
        .iter()
        .flatten()
        .fold((None::<f64>, None::<f64>), |(lo, hi), &v| {
            (
                Some(lo.map_or(v, |m| m.min(v))),
                Some(hi.map_or(v, |m| m.max(v))),
            )
        });
    let (Some(lo), Some(hi)) = (lo, hi) else {
        return vec![None; values.len()];
    };
    if hi == lo {
        return vec![None; values.len()];
    }
    let span = hi - lo;
    values
        .iter()
        .map(|v| {
            v.map(|v| {
                let n = (v - lo) / span;
                if invert { 1.0 - n } else { n }
            })
        })
        .collect()
}

/// Normalize one indicator column of the merged table, using the indicator's
/// direction flag.
pub fn normalize_column(rows: &[MergedRow], indicator: Indicator) -> Vec<Option<f64>> {
    let raw: Vec<Option<f64>> = rows.iter().map(|r| r.get(indicator)).collect();
    let out = min_max(&raw, indicator.spec().invert);
    if out.iter().all(Option::is_none) && raw.iter().any(Option::is_some) {
        log::warn!(
            "{} has no spread, its normalized column is empty",
            indicator.spec().raw_column
        );
    }
    out
}
