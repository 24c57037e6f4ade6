//! Pipeline entry points: read every source, reduce, merge, normalize, score.
//!
//! Nothing here depends on a fixed directory layout. Callers hand in a
//! [`Sources`] (or a full [`PipelineConfig`]) describing where the inputs are
//! and where the result goes.

use crate::error::{IndexError, Result};
use crate::indicators::{INDICATOR_COUNT, Indicator, SourceLayout};
use crate::merge::outer_join;
use crate::models::{FinalRecord, LatestValues, RawTable};
use crate::normalize::normalize_column;
use crate::reader::read_table;
use crate::reconcile::reconcile;
use crate::reduce::{latest_by_country, latest_hdi};
use crate::score::score;
use crate::storage::{self, OutputFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Input file for each indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sources {
    pub co2: PathBuf,
    pub air_pollution: PathBuf,
    pub renewables: PathBuf,
    pub protected_land: PathBuf,
    pub safe_water: PathBuf,
    pub life_expectancy: PathBuf,
    pub hdi: PathBuf,
}

impl Sources {
    /// The conventional file names inside one data directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            co2: dir.join("co2.csv"),
            air_pollution: dir.join("air_pollution.csv"),
            renewables: dir.join("wdi_renewables.csv"),
            protected_land: dir.join("wdi_protected.csv"),
            safe_water: dir.join("safe_water.csv"),
            life_expectancy: dir.join("life_expectancy.csv"),
            hdi: dir.join("hdi.csv"),
        }
    }

    /// Load a JSON object with one path per indicator. Relative paths are
    /// resolved against the JSON file's directory.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| IndexError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut sources: Sources =
            serde_json::from_str(&text).map_err(|source| IndexError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(base) = path.parent() {
            for p in sources.paths_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
        Ok(sources)
    }

    pub fn path(&self, indicator: Indicator) -> &Path {
        match indicator {
            Indicator::Co2 => &self.co2,
            Indicator::Pm25 => &self.air_pollution,
            Indicator::Renewables => &self.renewables,
            Indicator::ProtectedLand => &self.protected_land,
            Indicator::SafeWater => &self.safe_water,
            Indicator::LifeExpectancy => &self.life_expectancy,
            Indicator::Hdi => &self.hdi,
        }
    }

    fn paths_mut(&mut self) -> [&mut PathBuf; INDICATOR_COUNT] {
        [
            &mut self.co2,
            &mut self.air_pollution,
            &mut self.renewables,
            &mut self.protected_land,
            &mut self.safe_water,
            &mut self.life_expectancy,
            &mut self.hdi,
        ]
    }
}

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub sources: Sources,
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Also export the `*_n` columns.
    pub include_normalized: bool,
}

/// Reduce one loaded table according to the indicator's source layout.
pub fn reduce_table(indicator: Indicator, table: &RawTable) -> Result<LatestValues> {
    match indicator.spec().layout {
        SourceLayout::Observations(value) => {
            let obs = reconcile(table, value)?;
            Ok(latest_by_country(&obs))
        }
        SourceLayout::HdiWide => latest_hdi(table),
    }
}

/// Read and reduce every source. The first failing file aborts the run.
pub fn load_sources(sources: &Sources) -> Result<BTreeMap<Indicator, LatestValues>> {
    let mut out = BTreeMap::new();
    for indicator in Indicator::ALL {
        let path = sources.path(indicator);
        let table = read_table(path)?;
        let values = reduce_table(indicator, &table)?;
        log::info!(
            "{}: {} countries from {}",
            indicator.spec().raw_column,
            values.len(),
            path.display()
        );
        out.insert(indicator, values);
    }
    Ok(out)
}

/// Merge, normalize and score already reduced indicators.
///
/// Indicators absent from `reduced` are treated as empty sources.
pub fn compute_index(reduced: &BTreeMap<Indicator, LatestValues>) -> Vec<FinalRecord> {
    let inputs: Vec<(Indicator, &LatestValues)> =
        reduced.iter().map(|(ind, values)| (*ind, values)).collect();
    let rows = outer_join(&inputs);

    let columns: Vec<Vec<Option<f64>>> = Indicator::ALL
        .iter()
        .map(|ind| normalize_column(&rows, *ind))
        .collect();

    rows.into_iter()
        .enumerate()
        .map(|(r, row)| {
            let normalized: [Option<f64>; INDICATOR_COUNT] =
                std::array::from_fn(|i| columns[i][r]);
            FinalRecord {
                score: score(&normalized),
                country_code: row.country_code,
                raw: row.raw,
                normalized,
            }
        })
        .collect()
}

/// Read every source and compute the final records.
pub fn build_index(sources: &Sources) -> Result<Vec<FinalRecord>> {
    let reduced = load_sources(sources)?;
    Ok(compute_index(&reduced))
}

/// Build the index and write it to `config.output`.
///
/// The output is written only after every input was processed; on failure
/// no file is created or replaced.
pub fn run(config: &PipelineConfig) -> Result<Vec<FinalRecord>> {
    let records = build_index(&config.sources)?;
    storage::save(
        &records,
        &config.output,
        config.format,
        config.include_normalized,
    )?;
    log::info!(
        "wrote {} rows to {}",
        records.len(),
        config.output.display()
    );
    Ok(records)
}
