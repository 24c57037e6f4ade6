use crate::indicators::INDICATORS;
use crate::models::FinalRecord;
use crate::storage::SCORE_HEADER;
use serde::{Deserialize, Serialize};

/// Summary statistics for one exported column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

fn summarize(column: &str, values: impl Iterator<Item = Option<f64>>) -> Summary {
    let mut vals = Vec::new();
    let mut missing = 0usize;
    for v in values {
        match v {
            Some(v) => vals.push(v),
            None => missing += 1,
        }
    }
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let mean = if count > 0 {
        Some(vals.iter().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    Summary {
        column: column.to_string(),
        count,
        missing,
        min: vals.first().copied(),
        max: vals.last().copied(),
        mean,
        median,
    }
}

/// Statistics for every raw indicator column and the score, in export order.
pub fn column_summary(records: &[FinalRecord]) -> Vec<Summary> {
    let mut out: Vec<Summary> = INDICATORS
        .iter()
        .enumerate()
        .map(|(i, spec)| summarize(spec.raw_column, records.iter().map(|r| r.raw[i])))
        .collect();
    out.push(summarize(SCORE_HEADER, records.iter().map(|r| r.score)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_even_and_odd() {
        let s = summarize("x", [Some(4.0), Some(1.0), None, Some(3.0), Some(2.0)].into_iter());
        assert_eq!(s.count, 4);
        assert_eq!(s.missing, 1);
        assert_eq!(s.median, Some(2.5));

        let s = summarize("x", [Some(10.0), Some(30.0), Some(20.0)].into_iter());
        assert_eq!(s.median, Some(20.0));
        assert_eq!(s.mean, Some(20.0));
    }

    #[test]
    fn empty_column_has_no_stats() {
        let s = summarize("x", [None, None].into_iter());
        assert_eq!((s.count, s.missing), (0, 2));
        assert_eq!((s.min, s.max, s.mean, s.median), (None, None, None, None));
    }
}
