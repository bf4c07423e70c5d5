use std::path::PathBuf;

use crate::config::Configuration;
use crate::error::{BuildMetaError, Result};
use crate::properties::DEFAULT_PROPERTIES_FILE;

/// Tool-level settings, resolved from flags and environment by the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub properties_file: PathBuf,
  pub step_config: Option<PathBuf>,
}

impl Settings {
  pub fn new(properties_file: impl Into<PathBuf>) -> Self {
    Self { properties_file: properties_file.into(), step_config: None }
  }
}

impl Default for Settings {
  fn default() -> Self {
    Self::new(DEFAULT_PROPERTIES_FILE)
  }
}

/// Parse `key=value` arguments, splitting on the first `=`.
/// A repeated key keeps its last value.
pub fn parse_params<S: AsRef<str>>(args: &[S]) -> Result<Configuration> {
  let mut params = Configuration::new();
  for arg in args {
    let arg = arg.as_ref();
    let (key, value) = arg.split_once('=').ok_or_else(|| BuildMetaError::invalid_argument(arg))?;
    params.insert(key.to_string(), value.to_string());
  }
  Ok(params)
}
