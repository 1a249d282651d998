//! Loading of raw yearly records.
//!
//! A dataset is a JSON array with one object per year. Field validation is left to
//! [`tidemark_core::extraction::SeriesExtractor`].

use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tidemark_core::errors::{TrendError, TrendResult};

pub fn load_records_str(content: &str) -> TrendResult<Vec<Value>> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| TrendError::InvalidDataset(e.to_string()))?;

    match value {
        Value::Array(records) if records.is_empty() => Err(TrendError::InvalidDataset(
            "the dataset holds no records".to_string(),
        )),
        Value::Array(records) => {
            debug!("Loaded {} records", records.len());
            Ok(records)
        }
        other => Err(TrendError::InvalidDataset(format!(
            "expected an array of records, found {}",
            kind_of(&other)
        ))),
    }
}

pub fn load_records(path: impl AsRef<Path>) -> TrendResult<Vec<Value>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| TrendError::InvalidDataset(format!("{}: {}", path.display(), e)))?;
    load_records_str(&content)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_of_records() {
        let records = load_records_str(r#"[{"year": 2000}, {"year": 2001}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["year"], 2001);
    }

    #[test]
    fn rejected_documents() {
        assert_eq!(
            load_records_str(r#"{"year": 2000}"#),
            Err(TrendError::InvalidDataset(
                "expected an array of records, found an object".to_string()
            ))
        );
        assert!(matches!(
            load_records_str("[]"),
            Err(TrendError::InvalidDataset(_))
        ));
        assert!(matches!(
            load_records_str("[{"),
            Err(TrendError::InvalidDataset(_))
        ));
        assert!(matches!(
            load_records("missing.json"),
            Err(TrendError::InvalidDataset(_))
        ));
    }
}
