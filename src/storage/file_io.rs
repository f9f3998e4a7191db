//! JSON file helpers
//!
//! Writes go to a uniquely named temp file in the target's directory and are
//! renamed over the target, so readers only ever see a complete document.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::{CardError, CardResult};

/// Read a JSON document; a missing file yields `T::default()`
pub fn read_json<T, P>(path: P) -> CardResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(CardError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CardError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace `path` with the JSON form of `data`
///
/// Either the whole new document lands or the old file is left untouched.
/// The temp file is removed if anything fails before the rename.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> CardResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| {
        CardError::Storage(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
        CardError::Storage(format!("Failed to create temp file in {}: {}", dir.display(), e))
    })?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| CardError::Storage(format!("Failed to serialize data: {}", e)))?;
        writer
            .flush()
            .map_err(|e| CardError::Storage(format!("Failed to flush data: {}", e)))?;
    }
    temp.as_file()
        .sync_all()
        .map_err(|e| CardError::Storage(format!("Failed to sync data: {}", e)))?;

    temp.persist(path).map_err(|e| {
        CardError::Storage(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Sample {
        holder: String,
        cents: i64,
    }

    #[test]
    fn test_read_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Sample = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Sample::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        let path = nested.join("cards.json");
        let data = Sample {
            holder: "A B".into(),
            cents: 1050,
        };

        write_json_atomic(&path, &data).unwrap();
        write_json_atomic(&path, &data).unwrap();

        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded, data);
        // no temp files left next to the target
        assert_eq!(fs::read_dir(&nested).unwrap().count(), 1);
    }

    #[test]
    fn test_write_under_a_regular_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = write_json_atomic(blocker.join("cards.json"), &Sample::default());

        assert!(matches!(result, Err(CardError::Storage(_))));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "");
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.json");
        fs::write(&path, "not json").unwrap();

        let result: CardResult<Sample> = read_json(&path);
        assert!(matches!(result, Err(CardError::Storage(_))));
    }
}
