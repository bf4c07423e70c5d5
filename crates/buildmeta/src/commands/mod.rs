//! Command handlers and dispatch
//!
//! A handler declares which parameters it accepts, its defaults and the
//! pipeline step it belongs to. Dispatch resolves the effective
//! configuration from those declarations and hands it to the handler.

use tracing::debug;

use crate::config::{
  merge_data, Configuration, EmptyStepConfiguration, StepConfigurationSource,
  YamlStepConfiguration,
};
use crate::error::{BuildMetaError, Result};
use crate::git::{CommitIdSource, GitCommitId};
use crate::registry::Registry;
use crate::settings::Settings;
use crate::version::{PropertiesVersionProvider, VersionProvider, PROPERTIES_PROVIDER};

pub mod set_version;

pub use set_version::ArtifactSetVersion;

/// A registered command implementation
pub trait Handler {
  /// Run the command with its resolved configuration, returning the text
  /// to emit on stdout.
  fn call(&self, config: &Configuration, providers: &Registry<dyn VersionProvider>)
    -> Result<String>;

  fn parameter_keys(&self) -> &[&'static str];

  fn default_key_values(&self) -> Configuration;

  fn step_keys(&self) -> &[&'static str];

  fn step_name(&self) -> &str;
}

/// Everything a dispatch needs, built once at startup
pub struct Context {
  pub handlers: Registry<dyn Handler>,
  pub providers: Registry<dyn VersionProvider>,
  pub step_config: Box<dyn StepConfigurationSource>,
}

impl Context {
  pub fn new(step_config: Box<dyn StepConfigurationSource>) -> Self {
    Self {
      handlers: Registry::new("Callable"),
      providers: Registry::new("ArtifactVersion"),
      step_config,
    }
  }

  /// Register the built-in handlers and providers for `settings`
  pub fn bootstrap(settings: &Settings) -> Result<Self> {
    Self::bootstrap_with(settings, Box::new(GitCommitId))
  }

  pub fn bootstrap_with(settings: &Settings, commit_ids: Box<dyn CommitIdSource>) -> Result<Self> {
    let step_config: Box<dyn StepConfigurationSource> = match &settings.step_config {
      Some(path) => Box::new(YamlStepConfiguration::load(path)?),
      None => Box::new(EmptyStepConfiguration),
    };

    let mut context = Self::new(step_config);
    let properties = PropertiesVersionProvider::new(&settings.properties_file);
    context.handlers.register(set_version::COMMAND, Box::new(ArtifactSetVersion::new(commit_ids)));
    context.providers.register(PROPERTIES_PROVIDER, Box::new(properties));
    Ok(context)
  }
}

/// Look up the handler for `command`, resolve its configuration and run it
pub fn dispatch(context: &Context, command: &str, raw_params: &Configuration) -> Result<String> {
  debug!("Received command {command} with params {raw_params:?}");

  let handler =
    context.handlers.get(command).ok_or_else(|| BuildMetaError::unknown_command(command))?;

  let step_config = context.step_config.step_configuration(handler.step_name())?;
  let config = merge_data(
    raw_params,
    handler.parameter_keys(),
    &handler.default_key_values(),
    &step_config,
    handler.step_keys(),
  );
  debug!(command, ?config, "resolved configuration");

  handler.call(&config, &context.providers)
}
