//! CSV output.
//!
//! Serializes the accumulated sample rows to the output file in one
//! pass, with the fixed column order `email,r,g,b,season,confidence`.

use crate::models::SampleRow;
use anyhow::{Context, Result};
use std::path::Path;

/// CSV column order. Matches the serde field order of [`SampleRow`].
const HEADER: [&str; 6] = ["email", "r", "g", "b", "season", "confidence"];

/// Write all rows to `path`, truncating any existing file.
///
/// The header is written explicitly so an export with zero rows still
/// produces a header-only file.
pub fn write_rows(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;

    writer
        .write_record(HEADER)
        .context("Failed to write CSV header")?;

    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush output file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(email: Option<&str>, season: &str, rgb: [f64; 3]) -> SampleRow {
        SampleRow {
            email: email.map(String::from),
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            season: season.to_string(),
            confidence: None,
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");

        let rows = vec![
            SampleRow {
                email: Some("ana@example.com".to_string()),
                r: 182.0,
                g: 121.0,
                b: 99.0,
                season: "Autumn".to_string(),
                confidence: Some(0.91),
            },
            sample(None, "Winter", [96.0, 60.0, 52.0]),
        ];

        write_rows(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(HEADER.as_slice())
        );

        let read_back: Vec<SampleRow> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn test_zero_rows_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_rows(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "email,r,g,b,season,confidence\n");
    }

    #[test]
    fn test_quotes_fields_with_delimiters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoted.csv");

        let rows = vec![sample(None, "Deep, Cool Winter", [1.0, 2.0, 3.0])];
        write_rows(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Deep, Cool Winter\""));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read_back: Vec<SampleRow> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read_back[0].season, "Deep, Cool Winter");
    }

    #[test]
    fn test_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("samples.csv");

        let err = write_rows(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to open output file"));
    }
}
