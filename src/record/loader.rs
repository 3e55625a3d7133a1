//! Reading change records from YAML or JSON files.

use std::fs;
use std::path::Path;

use super::schema::ChangeRecord;
use crate::error::{EcaError, Result};

/// Load a change record file.
///
/// Files ending in `.json` are parsed as JSON; anything else as YAML.
///
/// # Errors
///
/// Returns `Io` if the file can't be read and `RecordParseError` if its
/// contents don't describe a record.
pub fn load_record(path: &Path) -> Result<ChangeRecord> {
    let content = fs::read_to_string(path)?;
    parse_record(&content, path)
}

/// Parse record content. `path` selects the format and labels errors.
///
/// Derived fields (total score, track, required ECA types) are recomputed
/// rather than trusted.
pub fn parse_record(content: &str, path: &Path) -> Result<ChangeRecord> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else if content.trim().is_empty() {
        Ok(ChangeRecord::default())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };

    let mut record = parsed.map_err(|message| EcaError::RecordParseError {
        path: path.to_path_buf(),
        message,
    })?;
    record.refresh_derived();
    Ok(record)
}
