use crate::error::{IndexError, Result};
use crate::indicators::INDICATORS;
use crate::models::FinalRecord;
use csv::WriterBuilder;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Header of the country column in every export.
pub const CODE_HEADER: &str = "isoA3";
pub const SCORE_HEADER: &str = "score";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// Guess from a file extension (`.json` → JSON, anything else → CSV).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

/// Column names of an export, in order.
pub fn headers(include_normalized: bool) -> Vec<&'static str> {
    let mut h = vec![CODE_HEADER];
    h.extend(INDICATORS.iter().map(|s| s.raw_column));
    if include_normalized {
        h.extend(INDICATORS.iter().map(|s| s.normalized_column));
    }
    h.push(SCORE_HEADER);
    h
}

/// Prefix cells that a spreadsheet would evaluate as a formula.
pub fn sanitize_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

fn fmt_value(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Write records as CSV with header; missing values are empty cells.
pub fn write_csv<W: Write>(records: &[FinalRecord], out: W, include_normalized: bool) -> csv::Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(out);
    wtr.write_record(headers(include_normalized))?;
    for r in records {
        let mut row = Vec::with_capacity(2 + 2 * INDICATORS.len());
        row.push(sanitize_cell(&r.country_code));
        row.extend(r.raw.iter().map(|v| fmt_value(*v)));
        if include_normalized {
            row.extend(r.normalized.iter().map(|v| fmt_value(*v)));
        }
        row.push(fmt_value(r.score));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// JSON view of a record with keys in export order.
struct ExportRow<'a> {
    record: &'a FinalRecord,
    include_normalized: bool,
}

impl Serialize for ExportRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let r = self.record;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(CODE_HEADER, &r.country_code)?;
        for (spec, v) in INDICATORS.iter().zip(r.raw.iter()) {
            map.serialize_entry(spec.raw_column, v)?;
        }
        if self.include_normalized {
            for (spec, v) in INDICATORS.iter().zip(r.normalized.iter()) {
                map.serialize_entry(spec.normalized_column, v)?;
            }
        }
        map.serialize_entry(SCORE_HEADER, &r.score)?;
        map.end()
    }
}

/// Write records as a pretty JSON array; missing values are `null`.
pub fn write_json<W: Write>(records: &[FinalRecord], out: W, include_normalized: bool) -> serde_json::Result<()> {
    let rows: Vec<ExportRow> = records
        .iter()
        .map(|record| ExportRow {
            record,
            include_normalized,
        })
        .collect();
    serde_json::to_writer_pretty(out, &rows)
}

/// Save records to `path`, replacing any existing file only once the whole
/// output has been written. Missing parent directories are created.
pub fn save<P: AsRef<Path>>(
    records: &[FinalRecord],
    path: P,
    format: OutputFormat,
    include_normalized: bool,
) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| IndexError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    let encoded = match format {
        OutputFormat::Csv => {
            write_csv(records, tmp.as_file_mut(), include_normalized).map_err(|e| e.to_string())
        }
        OutputFormat::Json => {
            write_json(records, tmp.as_file_mut(), include_normalized).map_err(|e| e.to_string())
        }
    };
    encoded.map_err(|message| IndexError::Encode {
        path: path.to_path_buf(),
        message,
    })?;
    tmp.as_file_mut().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Save as CSV.
pub fn save_csv<P: AsRef<Path>>(records: &[FinalRecord], path: P) -> Result<()> {
    save(records, path, OutputFormat::Csv, false)
}

/// Save as JSON.
pub fn save_json<P: AsRef<Path>>(records: &[FinalRecord], path: P) -> Result<()> {
    save(records, path, OutputFormat::Json, false)
}
