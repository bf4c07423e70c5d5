//! Layered configuration resolution
//!
//! A handler's effective configuration is built from three sources with
//! fixed precedence: declared defaults < step configuration < raw
//! invocation parameters. Step configuration and raw parameters are both
//! filtered through an allow-list of keys; anything not declared is
//! dropped even when present in the source.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{BuildMetaError, Result};

pub type Configuration = HashMap<String, String>;

/// Overlay the allow-listed keys of `source` onto `base`
fn overlay(source: &Configuration, keys: &[&str], base: Configuration) -> Configuration {
  let mut merged = base;
  for key in keys {
    if let Some(value) = source.get(*key) {
      merged.insert((*key).to_string(), value.clone());
    }
  }
  merged
}

/// Resolve the effective configuration for one invocation.
pub fn merge_data(
  raw_params: &Configuration,
  param_keys: &[&str],
  defaults: &Configuration,
  step_config: &Configuration,
  step_keys: &[&str],
) -> Configuration {
  let base = overlay(step_config, step_keys, defaults.clone());
  overlay(raw_params, param_keys, base)
}

/// Supplies configuration scoped to a named pipeline step
pub trait StepConfigurationSource {
  fn step_configuration(&self, step_name: &str) -> Result<Configuration>;
}

/// Source used when no step configuration is wired in
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyStepConfiguration;

impl StepConfigurationSource for EmptyStepConfiguration {
  fn step_configuration(&self, _step_name: &str) -> Result<Configuration> {
    Ok(Configuration::new())
  }
}

#[derive(Debug, Default, Deserialize)]
struct StepsFile {
  #[serde(default)]
  steps: HashMap<String, HashMap<String, serde_yaml::Value>>,
}

/// Step configuration read from a YAML file:
///
/// ```yaml
/// steps:
///   artifactSetVersion:
///     buildTool: rpm
/// ```
#[derive(Debug)]
pub struct YamlStepConfiguration {
  path: PathBuf,
  steps: HashMap<String, Configuration>,
}

impl YamlStepConfiguration {
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let content =
      fs::read_to_string(path).map_err(|e| BuildMetaError::step_config(path, e.to_string()))?;
    Self::from_yaml(path, &content)
  }

  fn from_yaml(path: &Path, content: &str) -> Result<Self> {
    let file: StepsFile = if content.trim().is_empty() {
      StepsFile::default()
    } else {
      serde_yaml::from_str(content).map_err(|e| BuildMetaError::step_config(path, e.to_string()))?
    };

    let mut steps = HashMap::new();
    for (step, values) in file.steps {
      let mut config = Configuration::new();
      for (key, value) in values {
        let value = scalar_to_string(&value).ok_or_else(|| {
          BuildMetaError::step_config(path, format!("value of '{step}.{key}' must be a scalar"))
        })?;
        config.insert(key, value);
      }
      steps.insert(step, config);
    }

    Ok(Self { path: path.to_path_buf(), steps })
  }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
  match value {
    serde_yaml::Value::String(s) => Some(s.clone()),
    serde_yaml::Value::Number(n) => Some(n.to_string()),
    serde_yaml::Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

impl StepConfigurationSource for YamlStepConfiguration {
  fn step_configuration(&self, step_name: &str) -> Result<Configuration> {
    let config = self.steps.get(step_name).cloned().unwrap_or_default();
    debug!(path = %self.path.display(), step = step_name, keys = config.len(), "step config");
    Ok(config)
  }
}
