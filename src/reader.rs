//! Loading raw tables from CSV files.
//!
//! World Bank (WDI) downloads start with a small metadata block
//! (`"Data Source","World Development Indicators"`, `"Last Updated Date",...`)
//! before the real header row. The reader detects it and skips it. Files that
//! are not valid UTF-8 are decoded once more as Windows-1252 (Latin-1).

use crate::error::{IndexError, Result};
use crate::models::RawTable;
use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::path::Path;

/// Signature of the WDI metadata block.
const METADATA_MARKER: &str = "Data Source";
/// How many leading lines are inspected for the marker.
const MARKER_SCAN_LINES: usize = 5;
/// Lines dropped when the marker is found.
const METADATA_LINES: usize = 3;

/// Read a CSV file into a [`RawTable`] labelled with the file name.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| IndexError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_table(&bytes, label)
}

/// Parse in-memory CSV bytes into a [`RawTable`].
pub fn parse_table(bytes: &[u8], label: impl Into<String>) -> Result<RawTable> {
    let label = label.into();
    let text = decode(bytes, &label);
    let body = skip_metadata(&text);

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .quote(b'"')
        .from_reader(body.as_bytes());
    let parse_err = |source| IndexError::Parse {
        file: label.clone(),
        source,
    };

    let headers: Vec<String> = rdr
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(parse_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    log::debug!("{}: {} columns, {} rows", label, headers.len(), rows.len());
    Ok(RawTable::new(label, headers, rows))
}

/// UTF-8 first (BOM stripped); Windows-1252 if that fails.
fn decode<'a>(bytes: &'a [u8], label: &str) -> Cow<'a, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            log::warn!("{} is not valid UTF-8, decoding as Windows-1252", label);
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

/// Drop the metadata block if one of the first lines carries the marker,
/// along with any blank lines that precede the header.
fn skip_metadata(text: &str) -> &str {
    let has_marker = text
        .lines()
        .take(MARKER_SCAN_LINES)
        .any(|l| l.contains(METADATA_MARKER));
    let mut rest = text;
    if has_marker {
        for _ in 0..METADATA_LINES {
            rest = match rest.find('\n') {
                Some(i) => &rest[i + 1..],
                None => "",
            };
        }
    }
    while let Some(i) = rest.find('\n') {
        if !rest[..i].trim().is_empty() {
            break;
        }
        rest = &rest[i + 1..];
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    const WDI: &str = "\"Data Source\",\"World Development Indicators\",\n\
\n\
\"Last Updated Date\",\"2024-06-28\",\n\
\n\
\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"2019\",\"2020\",\n\
\"Aruba\",\"ABW\",\"Renewables\",\"EG.ELC.RNEW.ZS\",\"10.5\",\"\",\n";

    #[test]
    fn skips_wdi_metadata_block() {
        let t = parse_table(WDI.as_bytes(), "wdi.csv").unwrap();
        assert_eq!(t.headers[0], "Country Name");
        assert_eq!(t.headers[5], "2020");
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.cell(0, 1), "ABW");
        assert_eq!(t.cell(0, 4), "10.5");
    }

    #[test]
    fn plain_csv_is_untouched() {
        let t = parse_table(b"isoA3,year,co2\nUSA,2020,14.2\n", "co2.csv").unwrap();
        assert_eq!(t.headers, vec!["isoA3", "year", "co2"]);
        assert_eq!(t.rows, vec![vec!["USA", "2020", "14.2"]]);
    }

    #[test]
    fn falls_back_to_single_byte_encoding() {
        // "Côte d'Ivoire" in Latin-1
        let bytes = b"Entity,Code,Year\nC\xF4te d'Ivoire,CIV,2020\n";
        let t = parse_table(bytes, "air.csv").unwrap();
        assert_eq!(t.cell(0, 0), "C\u{f4}te d'Ivoire");
    }

    #[test]
    fn strips_utf8_bom() {
        let t = parse_table(b"\xEF\xBB\xBFiso3,hdi_2020\nNOR,0.96\n", "hdi.csv").unwrap();
        assert_eq!(t.headers[0], "iso3");
    }

    #[test]
    fn ragged_rows_are_padded() {
        let t = parse_table(b"a,b,c\n1\n1,2,3,4\n", "r.csv").unwrap();
        assert_eq!(t.rows[0], vec!["1", "", ""]);
        assert_eq!(t.rows[1].len(), 3);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_table("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, IndexError::Read { .. }));
    }
}
