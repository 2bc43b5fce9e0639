//! Row data shown by the table views.
//!
//! Rows are plain immutable records. The application ships with a built-in
//! sample dataset and can optionally load a replacement from a JSON file.

mod sample;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use sample::sample_rows;

/// A single table row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    /// Unique, stable identifier.
    pub id: String,
    /// Display name. Single-row deletion requires typing this exactly.
    pub name: String,
    /// Category label.
    pub category: String,
}

impl Row {
    /// Create a new row.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a valid JSON array of rows.
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two rows share the same id.
    #[error("Duplicate row id '{0}'")]
    DuplicateId(String),

    /// A row has an empty id.
    #[error("Row '{0}' has an empty id")]
    EmptyId(String),
}

/// Parse a dataset from a JSON string.
///
/// The input must be an array of `{ "id", "name", "category" }` objects.
/// Ids must be non-empty and unique.
pub fn parse_rows(json: &str) -> Result<Vec<Row>, DataError> {
    let rows: Vec<Row> = serde_json::from_str(json)?;
    validate_rows(&rows)?;
    Ok(rows)
}

/// Load a dataset from a JSON file.
pub fn load_rows(path: &Path) -> Result<Vec<Row>, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_rows(&content)?;
    debug!(path = %path.display(), count = rows.len(), "Loaded dataset");
    Ok(rows)
}

fn validate_rows(rows: &[Row]) -> Result<(), DataError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if row.id.trim().is_empty() {
            return Err(DataError::EmptyId(row.name.clone()));
        }
        if !seen.insert(row.id.as_str()) {
            return Err(DataError::DuplicateId(row.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_rows() {
        let json = r#"[
            {"id": "a1", "name": "Alpha", "category": "One"},
            {"id": "b2", "name": "Beta", "category": "Two"}
        ]"#;
        let rows = parse_rows(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Row::new("a1", "Alpha", "One"));
        assert_eq!(rows[1].category, "Two");
    }

    #[test]
    fn test_parse_rows_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "x", "name": "First", "category": "A"},
            {"id": "x", "name": "Second", "category": "B"}
        ]"#;
        let err = parse_rows(json).unwrap_err();
        assert!(matches!(err, DataError::DuplicateId(ref id) if id == "x"));
    }

    #[test]
    fn test_parse_rows_rejects_empty_id() {
        let json = r#"[{"id": "  ", "name": "Nameless", "category": "A"}]"#;
        let err = parse_rows(json).unwrap_err();
        assert!(matches!(err, DataError::EmptyId(_)));
        assert!(err.to_string().contains("Nameless"));
    }

    #[test]
    fn test_parse_rows_rejects_malformed_json() {
        let err = parse_rows("{not json").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_load_rows_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "001", "name": "Acme", "category": "Technology"}}]"#
        )
        .unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows, vec![Row::new("001", "Acme", "Technology")]);
    }

    #[test]
    fn test_load_rows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rows(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_sample_rows_are_valid() {
        let rows = sample_rows();
        assert_eq!(rows.len(), 45);
        assert!(validate_rows(&rows).is_ok());
        assert_eq!(rows[4], Row::new("005", "Elite Innovations", "Technology"));
    }
}
