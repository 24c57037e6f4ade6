//! Schema reconciliation: turn a raw table into long-form observations.
//!
//! A table is first classified into a [`TableShape`] and then handed to the
//! transformer for that shape. Two shapes are recognized, checked in order:
//!
//! 1. **Already normalized**: a country-code column, a `year` column and the
//!    value column (`isoA3,year,renewables_elec_pct`, OWID `Entity,Code,Year,...`).
//! 2. **Wide year form** (WDI download): `Country Name`, `Country Code` and one
//!    column per 4-digit year.
//!
//! Anything else is a [`IndexError::SchemaMismatch`].

use crate::error::{IndexError, Result};
use crate::indicators::ValueColumn;
use crate::models::{Observation, RawTable, canonical_code, coerce_number, coerce_year};
use regex::Regex;
use std::sync::LazyLock;

/// Accepted names for the country-code column of a long-form table.
pub const CODE_COLUMNS: [&str; 4] = ["isoA3", "country_code", "iso3", "code"];
pub const YEAR_COLUMN: &str = "year";

static YEAR_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})$").expect("valid year regex"));

/// The recognized layouts, with the column indices each transformer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableShape {
    AlreadyNormalized {
        code: usize,
        year: usize,
        value: usize,
    },
    WideYear {
        code: usize,
        /// `(year, column)` pairs sorted by year.
        years: Vec<(i32, usize)>,
    },
}

/// Locate a value column in `table`, never returning one of `exclude`.
pub fn find_value_column(table: &RawTable, value: ValueColumn, exclude: &[usize]) -> Option<usize> {
    table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !exclude.contains(i))
        .find(|(_, h)| {
            let h = h.trim();
            match value {
                ValueColumn::Named(name) => h.eq_ignore_ascii_case(name),
                ValueColumn::Containing(frag) => {
                    h.to_lowercase().contains(&frag.to_lowercase())
                }
            }
        })
        .map(|(i, _)| i)
}

/// Columns whose trimmed header matches `pattern`, paired with the year taken
/// from the pattern's first capture group, sorted by year ascending.
pub fn year_columns(table: &RawTable, pattern: &Regex) -> Vec<(i32, usize)> {
    let mut cols: Vec<(i32, usize)> = table
        .headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let caps = pattern.captures(h.trim())?;
            let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
            Some((year, i))
        })
        .collect();
    cols.sort_by_key(|&(year, _)| year);
    cols
}

/// Decide which shape `table` has for the given value column.
pub fn classify(table: &RawTable, value: ValueColumn) -> Result<TableShape> {
    if let (Some(code), Some(year)) = (table.column_any(&CODE_COLUMNS), table.column(YEAR_COLUMN))
        && let Some(value) = find_value_column(table, value, &[code, year])
    {
        return Ok(TableShape::AlreadyNormalized { code, year, value });
    }

    if let (Some(_), Some(code)) = (table.column("country name"), table.column("country code")) {
        return Ok(TableShape::WideYear {
            code,
            years: year_columns(table, &YEAR_HEADER),
        });
    }

    Err(IndexError::SchemaMismatch {
        file: table.label.clone(),
        columns: table.headers.clone(),
    })
}

/// Classify `table` and reshape it into observations with canonical codes.
pub fn reconcile(table: &RawTable, value: ValueColumn) -> Result<Vec<Observation>> {
    let shape = classify(table, value)?;
    let out = match &shape {
        TableShape::AlreadyNormalized { code, year, value } => {
            from_normalized(table, *code, *year, *value)
        }
        TableShape::WideYear { code, years } => from_wide(table, *code, years),
    };
    log::info!(
        "{}: {} -> {} observations",
        table.label,
        shape_name(&shape),
        out.len()
    );
    Ok(out)
}

fn shape_name(shape: &TableShape) -> &'static str {
    match shape {
        TableShape::AlreadyNormalized { .. } => "already normalized",
        TableShape::WideYear { .. } => "wide year form",
    }
}

/// Rows without a usable code or year are dropped; missing values are kept.
fn from_normalized(table: &RawTable, code: usize, year: usize, value: usize) -> Vec<Observation> {
    let mut dropped = 0usize;
    let out: Vec<Observation> = (0..table.rows.len())
        .filter_map(|r| {
            let obs = canonical_code(table.cell(r, code)).and_then(|country_code| {
                Some(Observation {
                    country_code,
                    year: coerce_year(table.cell(r, year))?,
                    value: coerce_number(table.cell(r, value)),
                })
            });
            if obs.is_none() {
                dropped += 1;
            }
            obs
        })
        .collect();
    if dropped > 0 {
        log::debug!("{}: dropped {} rows without code or year", table.label, dropped);
    }
    out
}

/// Unpivot: one observation per (country, year column) with a value present.
fn from_wide(table: &RawTable, code: usize, years: &[(i32, usize)]) -> Vec<Observation> {
    let mut out = Vec::new();
    for r in 0..table.rows.len() {
        let Some(country_code) = canonical_code(table.cell(r, code)) else {
            continue;
        };
        for &(year, col) in years {
            if let Some(v) = coerce_number(table.cell(r, col)) {
                out.push(Observation {
                    country_code: country_code.clone(),
                    year,
                    value: Some(v),
                });
            }
        }
    }
    out
}
