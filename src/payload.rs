//! Decoding of detection payloads sent by the upstream detector.
//!
//! A payload is newline-delimited CSV: one header row naming the columns,
//! then one row per detection, e.g.
//!
//! ```text
//! xmin,ymin,xmax,ymax,confidence,class,name
//! 270.0,200.0,370.0,260.0,0.91,0,note
//! ```
//!
//! Columns are looked up by name, so extra columns and reordering are fine.
//! A row with the wrong number of fields or an unparsable value is rejected
//! on its own; a header lacking a required column rejects the whole payload.
use crate::types::Detection;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("payload has no header row")]
    Empty,
    #[error("header is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("unreadable header: {0}")]
    Header(String),
}

/// A data row that could not be turned into a [`Detection`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// 1-based row index, header excluded.
    pub row: usize,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParsedPayload {
    pub detections: Vec<Detection>,
    pub rejected: Vec<RowError>,
}

struct Columns {
    count: usize,
    xmin: usize,
    ymin: usize,
    xmax: usize,
    ymax: usize,
    confidence: usize,
    class_id: usize,
    label: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self, PayloadError> {
        let names: Vec<String> = header.iter().map(|n| n.to_ascii_lowercase()).collect();
        if names.iter().all(|n| n.is_empty()) {
            return Err(PayloadError::Empty);
        }
        let require = |name: &'static str, aliases: &[&str]| {
            find_column(&names, aliases).ok_or(PayloadError::MissingColumn(name))
        };
        Ok(Self {
            count: names.len(),
            xmin: require("xmin", &["xmin"])?,
            ymin: require("ymin", &["ymin"])?,
            xmax: require("xmax", &["xmax"])?,
            ymax: require("ymax", &["ymax"])?,
            confidence: require("confidence", &["confidence", "score"])?,
            class_id: require("class", &["class", "class_id", "classid"])?,
            label: find_column(&names, &["name", "label"]),
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Result<Detection, String> {
        if record.len() != self.count {
            return Err(format!(
                "expected {} fields, found {}",
                self.count,
                record.len()
            ));
        }
        let label = self
            .label
            .map(|i| &record[i])
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Detection {
            xmin: parse_finite("xmin", &record[self.xmin])?,
            ymin: parse_finite("ymin", &record[self.ymin])?,
            xmax: parse_finite("xmax", &record[self.xmax])?,
            ymax: parse_finite("ymax", &record[self.ymax])?,
            confidence: parse_finite("confidence", &record[self.confidence])?,
            class_id: parse_class(&record[self.class_id])?,
            label,
        })
    }
}

fn find_column(names: &[String], aliases: &[&str]) -> Option<usize> {
    names
        .iter()
        .position(|n| aliases.iter().any(|a| n.as_str() == *a))
}

fn parse_finite(name: &str, raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|e| format!("{name}: cannot parse {raw:?}: {e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{name}: non-finite value {raw:?}"))
    }
}

fn parse_class(raw: &str) -> Result<i64, String> {
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    // pandas sometimes writes integer columns as floats
    let v = parse_finite("class", raw)?;
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Ok(v as i64)
    } else {
        Err(format!("class: {raw:?} is not an integer"))
    }
}

/// Parse one CSV payload into detections plus per-row rejections.
pub fn parse_payload(text: &str) -> Result<ParsedPayload, PayloadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let header = reader
        .headers()
        .map_err(|e| PayloadError::Header(e.to_string()))?;
    let columns = Columns::from_header(header)?;

    let mut parsed = ParsedPayload::default();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|record| columns.parse_row(&record));
        match outcome {
            Ok(det) => parsed.detections.push(det),
            Err(reason) => {
                warn!("payload row {} rejected: {}", row, reason);
                parsed.rejected.push(RowError { row, reason });
            }
        }
    }
    Ok(parsed)
}
