//! Writers for handing a generated series to charting tools.
//!
//! CSV and JSON are meant for other programs; the table format is for
//! reading in a terminal.

use crate::{Error, Result, Sample};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Output format for a series
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeriesFormat {
    #[default]
    Csv,
    Json,
    Table,
}

impl FromStr for SeriesFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(SeriesFormat::Csv),
            "json" => Ok(SeriesFormat::Json),
            "table" => Ok(SeriesFormat::Table),
            other => Err(Error::Config(format!(
                "Unknown output format '{}' (expected csv, json or table)",
                other
            ))),
        }
    }
}

/// Write `samples` to `writer` in the given format
pub fn write_series<W: Write>(samples: &[Sample], format: SeriesFormat, writer: W) -> Result<()> {
    match format {
        SeriesFormat::Csv => write_csv(samples, writer),
        SeriesFormat::Json => write_json(samples, writer),
        SeriesFormat::Table => write_table(samples, writer),
    }
}

fn write_csv<W: Write>(samples: &[Sample], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for sample in samples {
        writer.serialize(sample)?;
    }
    // An empty series still gets its header
    if samples.is_empty() {
        writer.write_record(["time", "value", "patches"])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(samples: &[Sample], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, samples)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn write_table<W: Write>(samples: &[Sample], mut writer: W) -> Result<()> {
    writeln!(writer, "{:>8}  {:>12}  {:>8}", "hour", "value", "patches")?;
    for sample in samples {
        writeln!(
            writer,
            "{:>8}  {:>12.3}  {:>8.2}",
            sample.time, sample.value, sample.patches
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `samples` to a file, creating parent directories as needed
pub fn export_to_path(samples: &[Sample], format: SeriesFormat, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_series(samples, format, &mut writer)?;

    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Wrote {} samples to {:?}", samples.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Sample> {
        vec![
            Sample { time: 0, value: 10.0, patches: 1.0 },
            Sample { time: 1, value: 5.5, patches: 1.0 },
            Sample { time: 2, value: 0.25, patches: 0.0 },
        ]
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!("csv".parse::<SeriesFormat>().unwrap(), SeriesFormat::Csv);
        assert_eq!("JSON".parse::<SeriesFormat>().unwrap(), SeriesFormat::Json);
        assert_eq!("Table".parse::<SeriesFormat>().unwrap(), SeriesFormat::Table);
        assert!(matches!("xml".parse::<SeriesFormat>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_csv_output() {
        let mut out = Vec::new();
        write_series(&samples(), SeriesFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("time,value,patches"));
        assert_eq!(lines.next(), Some("0,10.0,1.0"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_csv_empty_series_has_header() {
        let mut out = Vec::new();
        write_series(&[], SeriesFormat::Csv, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "time,value,patches");
    }

    #[test]
    fn test_json_output_parses_back() {
        let mut out = Vec::new();
        write_series(&samples(), SeriesFormat::Json, &mut out).unwrap();

        let parsed: Vec<Sample> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, samples());
    }

    #[test]
    fn test_table_output() {
        let mut out = Vec::new();
        write_series(&samples(), SeriesFormat::Table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("    hour"));
        assert!(text.contains("5.500"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_export_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("series.csv");

        export_to_path(&samples(), SeriesFormat::Csv, &path).unwrap();

        let reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.into_records().count(), 3);
    }
}
