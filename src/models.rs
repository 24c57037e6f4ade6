use crate::indicators::{INDICATOR_COUNT, Indicator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An untyped table as loaded from a source file: headers plus rows of text.
///
/// Every row has exactly `headers.len()` cells (short rows are padded with
/// empty strings by the reader).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    /// Where the table came from, used in error messages.
    pub label: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(label: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, String::new());
                r
            })
            .collect();
        Self {
            label: label.into(),
            headers,
            rows,
        }
    }

    /// Index of the first header equal to `name` (trimmed, case-insensitive).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.column_where(|h| h.eq_ignore_ascii_case(name))
    }

    /// Index of the first header whose trimmed text satisfies `pred`.
    pub fn column_where(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.headers.iter().position(|h| pred(h.trim()))
    }

    /// Index of the first header matching any of `names`, in header order.
    pub fn column_any(&self, names: &[&str]) -> Option<usize> {
        self.column_where(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(String::as_str).unwrap_or("")
    }
}

/// Canonical join key: trimmed and upper-cased. Empty codes yield `None`.
pub fn canonical_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_uppercase())
    }
}

/// Coerce a cell to a number; anything unparseable or non-finite is missing.
pub fn coerce_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a cell to a calendar year (`2020` and `2020.0` both accepted).
pub fn coerce_year(raw: &str) -> Option<i32> {
    let v = coerce_number(raw)?;
    if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

/// One long-form observation: a country's value for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub country_code: String,
    pub year: i32,
    pub value: Option<f64>,
}

/// An indicator reduced to one value per country.
pub type LatestValues = BTreeMap<String, Option<f64>>;

/// One country after the outer join, raw values in indicator order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub country_code: String,
    pub raw: [Option<f64>; INDICATOR_COUNT],
}

impl MergedRow {
    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        self.raw[indicator.index()]
    }
}

/// A scored country as exported.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalRecord {
    pub country_code: String,
    pub raw: [Option<f64>; INDICATOR_COUNT],
    pub normalized: [Option<f64>; INDICATOR_COUNT],
    /// Missing when none of the normalized values is present.
    pub score: Option<f64>,
}

impl FinalRecord {
    pub fn raw(&self, indicator: Indicator) -> Option<f64> {
        self.raw[indicator.index()]
    }

    pub fn normalized(&self, indicator: Indicator) -> Option<f64> {
        self.normalized[indicator.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_trimmed_and_uppercased() {
        assert_eq!(canonical_code(" usa "), Some("USA".into()));
        assert_eq!(canonical_code("USA"), Some("USA".into()));
        assert_eq!(canonical_code("   "), None);
    }

    #[test]
    fn coercion_treats_garbage_as_missing() {
        assert_eq!(coerce_number(" 4.5 "), Some(4.5));
        assert_eq!(coerce_number(".."), None);
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_year("2020"), Some(2020));
        assert_eq!(coerce_year("2020.0"), Some(2020));
        assert_eq!(coerce_year("2020.5"), None);
        assert_eq!(coerce_year("YR2020"), None);
    }

    #[test]
    fn short_rows_are_padded() {
        let t = RawTable::new(
            "t",
            vec!["a".into(), " b ".into()],
            vec![vec!["1".into()]],
        );
        assert_eq!(t.cell(0, 1), "");
        assert_eq!(t.column("B"), Some(1));
    }
}
