use tracing::info;

use super::Handler;
use crate::config::Configuration;
use crate::error::{BuildMetaError, Result};
use crate::git::CommitIdSource;
use crate::registry::Registry;
use crate::version::{VersionProvider, PROPERTIES_PROVIDER};

pub const COMMAND: &str = "artifactSetVersion";

const PARAMETER_KEYS: &[&str] = &[
  "buildTool",
  "gitCommitId",
  "gitUserEMail",
  "gitUserName",
  "timestamp",
  "timestampTemplate",
  "versioningTemplate",
  "version",
  "provider",
];

/// Reports the artifact version, updating it first when `version` is given
pub struct ArtifactSetVersion {
  commit_ids: Box<dyn CommitIdSource>,
}

impl ArtifactSetVersion {
  pub fn new(commit_ids: Box<dyn CommitIdSource>) -> Self {
    Self { commit_ids }
  }
}

impl Handler for ArtifactSetVersion {
  fn call(
    &self,
    config: &Configuration,
    providers: &Registry<dyn VersionProvider>,
  ) -> Result<String> {
    let name = config.get("provider").map(String::as_str).unwrap_or(PROPERTIES_PROVIDER);
    let provider = providers.get(name).ok_or_else(|| BuildMetaError::unknown_provider(name))?;

    if let Some(version) = config.get("version") {
      provider.set_version(version)?;
      info!(provider = name, version = %version, "updated artifact version");
    }

    Ok(format!("Artifact version is {}", provider.get_version()?))
  }

  fn parameter_keys(&self) -> &[&'static str] {
    PARAMETER_KEYS
  }

  fn default_key_values(&self) -> Configuration {
    let mut defaults = Configuration::new();
    defaults.insert("provider".to_string(), PROPERTIES_PROVIDER.to_string());
    if let Some(commit) = self.commit_ids.commit_id() {
      defaults.insert("gitCommitId".to_string(), commit);
    }
    defaults
  }

  fn step_keys(&self) -> &[&'static str] {
    self.parameter_keys()
  }

  fn step_name(&self) -> &str {
    COMMAND
  }
}
