//! Artifact version providers
//!
//! A provider reads and writes the version of the artifact being built.
//! Providers are looked up by name, so other backends (package manager
//! metadata, tags) can be added next to the properties-file one.

use std::fmt;
use std::path::PathBuf;

use crate::error::{BuildMetaError, Result};
use crate::properties::PropertiesFile;

/// Name the properties-file provider is registered under
pub const PROPERTIES_PROVIDER: &str = "artifactversion";

pub const VERSION_KEY: &str = "VERSION";
pub const RELEASE_KEY: &str = "RELEASE";

pub trait VersionProvider {
  fn get_version(&self) -> Result<String>;
  fn set_version(&self, version: &str) -> Result<()>;
}

/// A `VERSION-RELEASE` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
  pub version: String,
  pub release: String,
}

impl VersionSpec {
  /// Parse `VERSION-RELEASE`. Each part must survive a properties file
  /// round trip unchanged: no line breaks, no surrounding whitespace.
  pub fn parse(input: &str) -> Result<Self> {
    let &[version, release] = input.split('-').collect::<Vec<_>>().as_slice() else {
      return Err(BuildMetaError::invalid_version_format(input));
    };

    let storable = |part: &str| !part.contains(['\n', '\r']) && part.trim() == part;
    if !storable(version) || !storable(release) {
      return Err(BuildMetaError::invalid_version_format(input));
    }

    Ok(Self { version: version.to_string(), release: release.to_string() })
  }
}

impl fmt::Display for VersionSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.version, self.release)
  }
}

/// Version stored as the `VERSION` and `RELEASE` keys of a properties file
#[derive(Debug, Clone)]
pub struct PropertiesVersionProvider {
  file: PropertiesFile,
}

impl PropertiesVersionProvider {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { file: PropertiesFile::new(path) }
  }
}

impl VersionProvider for PropertiesVersionProvider {
  fn get_version(&self) -> Result<String> {
    let record = self.file.read()?;
    let lookup = |key: &str| {
      record.get(key).cloned().ok_or_else(|| BuildMetaError::missing_key(key, self.file.path()))
    };

    let spec = VersionSpec { version: lookup(VERSION_KEY)?, release: lookup(RELEASE_KEY)? };
    Ok(spec.to_string())
  }

  fn set_version(&self, version: &str) -> Result<()> {
    let spec = VersionSpec::parse(version)?;
    let mut record = self.file.read()?;
    record.insert(VERSION_KEY.to_string(), spec.version);
    record.insert(RELEASE_KEY.to_string(), spec.release);
    self.file.write(&record)
  }
}
