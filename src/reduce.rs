//! Temporal reduction: keep one value per country, the most recent one.

use crate::error::{IndexError, Result};
use crate::models::{LatestValues, Observation, RawTable, canonical_code, coerce_number};
use crate::reconcile::year_columns;
use regex::Regex;
use std::sync::LazyLock;

static HDI_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^hdi_(\d{4})$").expect("valid hdi regex"));

/// Reduce observations to the latest non-missing value per country.
///
/// Observations are visited in ascending year order (stable, so equal years
/// keep input order and the later row wins). A country whose observations are
/// all missing still gets an entry, with a missing value.
pub fn latest_by_country(observations: &[Observation]) -> LatestValues {
    let mut order: Vec<&Observation> = observations.iter().collect();
    order.sort_by_key(|o| o.year);

    let mut out = LatestValues::new();
    for obs in order {
        let slot = out.entry(obs.country_code.clone()).or_insert(None);
        if obs.value.is_some() {
            *slot = obs.value;
        }
    }
    out
}

/// Reduce the HDI wide table (`iso3`, `hdi_1990` .. `hdi_2022`) to the last
/// non-missing value per row, reading the year columns in ascending order.
///
/// Fails with [`IndexError::SchemaMismatch`] when there is no `iso3` column.
pub fn latest_hdi(table: &RawTable) -> Result<LatestValues> {
    let code = table
        .column("iso3")
        .ok_or_else(|| IndexError::SchemaMismatch {
            file: table.label.clone(),
            columns: table.headers.clone(),
        })?;
    let years = year_columns(table, &HDI_HEADER);
    if years.is_empty() {
        log::warn!("{}: no hdi_YYYY columns, every value is missing", table.label);
    }

    let mut out = LatestValues::new();
    for r in 0..table.rows.len() {
        let Some(country) = canonical_code(table.cell(r, code)) else {
            continue;
        };
        let latest = years
            .iter()
            .rev()
            .find_map(|&(_, col)| coerce_number(table.cell(r, col)));
        let slot = out.entry(country).or_insert(None);
        if latest.is_some() {
            *slot = latest;
        }
    }
    Ok(out)
}
