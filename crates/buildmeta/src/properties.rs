//! Flat `KEY=VALUE` properties files
//!
//! The on-disk form has no section headers: the whole body is one
//! implicit section. Keys are case-sensitive and kept in file order so a
//! rewrite preserves the layout of the original.

use indexmap::IndexMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{BuildMetaError, Result};

pub const DEFAULT_PROPERTIES_FILE: &str = "build.properties";

pub type PropertiesRecord = IndexMap<String, String>;

/// Parse a properties body. `path` is only used for error reporting.
pub fn parse(body: &str, path: &Path) -> Result<PropertiesRecord> {
  let mut record = PropertiesRecord::new();

  for (index, raw_line) in body.lines().enumerate() {
    let line = raw_line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
      continue;
    }

    let (key, value) = line
      .split_once('=')
      .ok_or_else(|| BuildMetaError::malformed_record(path, index + 1, raw_line))?;

    let key = key.trim();
    if key.is_empty() {
      return Err(BuildMetaError::malformed_record(path, index + 1, raw_line));
    }

    record.insert(key.to_string(), value.trim().to_string());
  }

  Ok(record)
}

pub fn serialize(record: &PropertiesRecord) -> String {
  record.iter().map(|(key, value)| format!("{key}={value}\n")).collect()
}

/// A properties file on disk, read and written in full
#[derive(Debug, Clone)]
pub struct PropertiesFile {
  path: PathBuf,
}

impl PropertiesFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn read(&self) -> Result<PropertiesRecord> {
    let body = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
      io::ErrorKind::NotFound => BuildMetaError::missing_file(&self.path),
      _ => BuildMetaError::read(&self.path, e),
    })?;
    let record = parse(&body, &self.path)?;
    debug!(path = %self.path.display(), keys = record.len(), "read properties");
    Ok(record)
  }

  /// Replace the file with `record`. The body goes to a temp file in the
  /// same directory which is then renamed over the target.
  pub fn write(&self, record: &PropertiesRecord) -> Result<()> {
    self.replace(&serialize(record)).map_err(|e| BuildMetaError::write(&self.path, e))?;
    debug!(path = %self.path.display(), keys = record.len(), "wrote properties");
    Ok(())
  }

  fn replace(&self, body: &str) -> io::Result<()> {
    let dir = match self.path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(body.as_bytes())?;
    if let Ok(metadata) = fs::metadata(&self.path) {
      temp.as_file().set_permissions(metadata.permissions())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(&self.path).map_err(|e| e.error)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn record(pairs: &[(&str, &str)]) -> PropertiesRecord {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn test_parse_flat_body() {
    let parsed = parse("VERSION=1.0\nRELEASE=5\n", Path::new("build.properties")).unwrap();
    assert_eq!(parsed, record(&[("VERSION", "1.0"), ("RELEASE", "5")]));
  }

  #[test]
  fn test_parse_keeps_key_case_and_order() {
    let parsed = parse("release=b\nRELEASE=a\nName=x\n", Path::new("p")).unwrap();
    let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["release", "RELEASE", "Name"]);
  }

  #[test]
  fn test_parse_skips_blank_and_comment_lines() {
    let body = "# generated\n\n; legacy comment\nVERSION = 2.1 \n   \nRELEASE=7";
    let parsed = parse(body, Path::new("p")).unwrap();
    assert_eq!(parsed, record(&[("VERSION", "2.1"), ("RELEASE", "7")]));
  }

  #[test]
  fn test_parse_splits_on_first_equals() {
    let parsed = parse("URL=https://host/?a=b\n", Path::new("p")).unwrap();
    assert_eq!(parsed["URL"], "https://host/?a=b");
  }

  #[test]
  fn test_parse_allows_empty_value() {
    let parsed = parse("RELEASE=\n", Path::new("p")).unwrap();
    assert_eq!(parsed["RELEASE"], "");
  }

  #[test]
  fn test_parse_duplicate_key_later_wins() {
    let parsed = parse("VERSION=1\nRELEASE=2\nVERSION=3\n", Path::new("p")).unwrap();
    assert_eq!(parsed["VERSION"], "3");
    assert_eq!(parsed.get_index(0).map(|(k, _)| k.as_str()), Some("VERSION"));
  }

  #[test]
  fn test_parse_rejects_line_without_separator() {
    let err = parse("VERSION=1.0\njunk\n", Path::new("p")).unwrap_err();
    match err {
      BuildMetaError::MalformedRecord { line_number, line, .. } => {
        assert_eq!(line_number, 2);
        assert_eq!(line, "junk");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn test_parse_rejects_empty_key() {
    let err = parse("=1.0\n", Path::new("p")).unwrap_err();
    assert!(matches!(err, BuildMetaError::MalformedRecord { line_number: 1, .. }));
  }

  #[test]
  fn test_serialize_has_no_section_header() {
    let body = serialize(&record(&[("VERSION", "1.0"), ("RELEASE", "5")]));
    assert_eq!(body, "VERSION=1.0\nRELEASE=5\n");
  }

  #[test]
  fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let file = PropertiesFile::new(dir.path().join("build.properties"));

    let err = file.read().unwrap_err();
    assert!(matches!(err, BuildMetaError::MissingFile { .. }));
  }

  #[test]
  fn test_read_directory_is_read_error() {
    let dir = TempDir::new().unwrap();
    let file = PropertiesFile::new(dir.path());

    let err = file.read().unwrap_err();
    assert!(matches!(err, BuildMetaError::Read { .. }), "{err:?}");
  }

  #[test]
  fn test_write_then_read_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("build.properties");
    fs::write(&path, "# header\nNAME=widget\nVERSION=1.0\nRELEASE=5\n").unwrap();
    let file = PropertiesFile::new(&path);

    let first = file.read().unwrap();
    file.write(&first).unwrap();
    let second = file.read().unwrap();
    file.write(&second).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&path).unwrap(), "NAME=widget\nVERSION=1.0\nRELEASE=5\n");
  }

  #[test]
  fn test_write_creates_file_and_leaves_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("build.properties");
    let file = PropertiesFile::new(&path);

    file.write(&record(&[("VERSION", "3.0"), ("RELEASE", "1")])).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "VERSION=3.0\nRELEASE=1\n");
  }

  #[test]
  fn test_write_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let file = PropertiesFile::new(dir.path().join("nope").join("build.properties"));

    let err = file.write(&record(&[("VERSION", "1")])).unwrap_err();
    assert!(matches!(err, BuildMetaError::Write { .. }));
  }
}
