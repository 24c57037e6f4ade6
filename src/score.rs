use crate::indicators::{INDICATOR_COUNT, INDICATORS};

/// Weighted average over the present components.
///
/// Each `(weight, value)` pair with a value contributes to both the weighted
/// sum and the weight total; missing components are left out of both. So the
/// weights are effectively renormalized over what is present. Returns `None`
/// when nothing is present.
pub fn weighted_average<I>(components: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, Option<f64>)>,
{
    let (num, den) = components
        .into_iter()
        .filter_map(|(w, v)| v.map(|v| (w, v)))
        .fold((0.0, 0.0), |(num, den), (w, v)| (num + w * v, den + w));
    if den > 0.0 { Some(num / den) } else { None }
}

/// Composite score of one country from its normalized values, using the
/// weights of the indicator table.
pub fn score(normalized: &[Option<f64>; INDICATOR_COUNT]) -> Option<f64> {
    weighted_average(
        INDICATORS
            .iter()
            .zip(normalized.iter())
            .map(|(spec, v)| (spec.weight, *v)),
    )
}
