//! File helpers used by the binaries.
//!
//! - `read_text_file`: read a UTF-8 file with a contextual error.
//! - `write_json_file`: pretty-print a serializable value to disk.
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn read_text_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position3D;

    #[test]
    fn json_round_trip_creates_directories() {
        let dir = std::env::temp_dir().join(format!("torus_locator_io_{}", std::process::id()));
        let path = dir.join("nested").join("pos.json");
        write_json_file(&path, &Position3D::new(1.0, 2.5, -3.0)).unwrap();
        let text = read_text_file(&path).unwrap();
        let back: Position3D = serde_json::from_str(&text).unwrap();
        assert_eq!(back, Position3D::new(1.0, 2.5, -3.0));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_text_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.contains("/definitely/not/here.csv"));
    }
}
