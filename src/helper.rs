use std::{
    fs,
    io::Write,
    path::Path,
};

use chrono::{DateTime, Duration, Utc};
use log::{debug, error, trace};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::{PlannerError, Result};

/// Loads a JSON document from disk. Returns `None` if the file does not exist.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        debug!("No file at {}, nothing to load", path.display());
        return Ok(None);
    }

    debug!("Loading JSON from file: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to open file {}: {}", path.display(), e);
        PlannerError::Io(e)
    })?;

    let value = serde_json::from_str(&content).map_err(|e| {
        error!("Failed to parse {}: {}", path.display(), e);
        PlannerError::Serialization(e)
    })?;

    trace!("Successfully loaded {}", path.display());
    Ok(Some(value))
}

/// Saves a value as pretty JSON using a temp file and an atomic rename
pub fn save_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    // Create the temp file next to the target so the rename stays on one filesystem
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        debug!("Creating parent directory: {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| {
            error!("Failed to create directory {}: {}", dir.display(), e);
            PlannerError::DirectoryError {
                path: dir.to_path_buf(),
            }
        })?;
    }

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        error!("Failed to create temporary file: {}", e);
        PlannerError::Io(e)
    })?;

    trace!("Serializing to JSON");
    let json = serde_json::to_string_pretty(value)?;

    temp_file.write_all(json.as_bytes()).map_err(|e| {
        error!("Failed to write to temporary file: {}", e);
        PlannerError::Io(e)
    })?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        error!("Failed to persist file {}: {}", path.display(), e.error);
        PlannerError::Io(e.error)
    })?;

    debug!("Saved {}", path.display());
    Ok(())
}

/// Parses a due date given either as RFC 3339 or as an offset from `now`
/// such as `+90m`, `+2h` or `+1d`.
pub fn parse_due_date(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    let invalid = || PlannerError::InvalidDueDate {
        input: input.to_string(),
    };

    if let Some(offset) = trimmed.strip_prefix('+') {
        let unit = offset.chars().last().ok_or_else(invalid)?;
        let amount = offset.strip_suffix(unit).ok_or_else(invalid)?;
        let amount: i64 = amount.parse().map_err(|_| invalid())?;
        let delta = match unit {
            'm' => Duration::try_minutes(amount),
            'h' => Duration::try_hours(amount),
            'd' => Duration::try_days(amount),
            _ => None,
        }
        .ok_or_else(invalid)?;
        return now.checked_add_signed(delta).ok_or_else(invalid);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.json");
        let sample = Sample {
            name: "plan".to_string(),
            count: 3,
        };

        save_json_atomic(&path, &sample).unwrap();
        let loaded: Option<Sample> = load_json_file(&path).unwrap();
        assert_eq!(loaded, Some(sample));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<Sample> = load_json_file(&dir.path().join("missing.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_parse_due_date_offsets() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        assert_eq!(parse_due_date("+90m", now).unwrap(), now + Duration::minutes(90));
        assert_eq!(parse_due_date("+2h", now).unwrap(), now + Duration::hours(2));
        assert_eq!(parse_due_date("+1d", now).unwrap(), now + Duration::days(1));
    }

    #[test]
    fn test_parse_due_date_rfc3339() {
        let now = Utc::now();
        let parsed = parse_due_date("2026-05-04T10:30:00Z", now).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 5, 4, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_due_date_rejects_garbage() {
        let now = Utc::now();
        assert!(matches!(
            parse_due_date("tomorrow", now),
            Err(PlannerError::InvalidDueDate { .. })
        ));
        assert!(parse_due_date("+5w", now).is_err());
        assert!(parse_due_date("+h", now).is_err());
        assert!(parse_due_date("+", now).is_err());
    }

    #[test]
    fn test_parse_due_date_multibyte_unit_is_an_error() {
        let now = Utc::now();
        assert!(matches!(
            parse_due_date("+5é", now),
            Err(PlannerError::InvalidDueDate { .. })
        ));
        assert!(parse_due_date("+é", now).is_err());
    }

    #[test]
    fn test_parse_due_date_out_of_range_is_an_error() {
        let now = Utc::now();
        assert!(matches!(
            parse_due_date("+9999999999999d", now),
            Err(PlannerError::InvalidDueDate { .. })
        ));
        assert!(parse_due_date("+9223372036854775807m", now).is_err());
        assert!(parse_due_date("+-9999999999999h", now).is_err());
    }
}
