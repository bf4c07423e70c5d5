//! Pluggable build pipeline commands for artifact version metadata
//!
//! A command name selects a registered [`commands::Handler`]; the handler's
//! configuration is resolved from its defaults, the pipeline step
//! configuration and the invocation parameters, then the handler runs
//! against a named [`version::VersionProvider`].

pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod properties;
pub mod registry;
pub mod settings;
pub mod version;

pub use commands::{dispatch, Context, Handler};
pub use config::{merge_data, Configuration, StepConfigurationSource};
pub use error::{BuildMetaError, Result};
pub use settings::Settings;
pub use version::VersionProvider;
