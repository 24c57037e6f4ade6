use crate::indicators::{INDICATOR_COUNT, Indicator};
use crate::models::{LatestValues, MergedRow};
use std::collections::BTreeMap;

/// Full outer join of the reduced indicators on country code.
///
/// Every country present in at least one input yields exactly one row; the
/// other indicator columns are missing. Rows come out sorted by code.
pub fn outer_join(indicators: &[(Indicator, &LatestValues)]) -> Vec<MergedRow> {
    let mut rows: BTreeMap<&str, [Option<f64>; INDICATOR_COUNT]> = BTreeMap::new();
    for (indicator, values) in indicators {
        for (code, value) in values.iter() {
            let raw = rows.entry(code.as_str()).or_insert([None; INDICATOR_COUNT]);
            raw[indicator.index()] = *value;
        }
    }
    rows.into_iter()
        .map(|(code, raw)| MergedRow {
            country_code: code.to_string(),
            raw,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, Option<f64>)]) -> LatestValues {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn country_in_single_source_still_gets_a_row() {
        let co2 = values(&[("USA", Some(14.0)), ("FRA", Some(4.5))]);
        let air = values(&[("USA", Some(7.0)), ("XKX", Some(12.0))]);
        let rows = outer_join(&[(Indicator::Co2, &co2), (Indicator::Pm25, &air)]);

        let codes: Vec<_> = rows.iter().map(|r| r.country_code.as_str()).collect();
        assert_eq!(codes, vec!["FRA", "USA", "XKX"]);

        let xkx = &rows[2];
        assert_eq!(xkx.get(Indicator::Pm25), Some(12.0));
        assert!(
            Indicator::ALL
                .iter()
                .filter(|i| **i != Indicator::Pm25)
                .all(|i| xkx.get(*i).is_none())
        );
    }

    #[test]
    fn join_does_not_duplicate() {
        let a = values(&[("USA", Some(1.0))]);
        let b = values(&[("USA", None)]);
        let rows = outer_join(&[(Indicator::SafeWater, &a), (Indicator::Hdi, &b)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(Indicator::SafeWater), Some(1.0));
        assert_eq!(rows[0].get(Indicator::Hdi), None);
    }
}
