use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildMetaError>;

#[derive(Error, Debug)]
pub enum BuildMetaError {
  #[error("Properties file not found: {}", path.display())]
  MissingFile { path: PathBuf },

  #[error("Failed to read '{}': {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Malformed line {line_number} in '{}': expected KEY=VALUE, got '{line}'", path.display())]
  MalformedRecord { path: PathBuf, line_number: usize, line: String },

  #[error("Required key '{key}' missing from '{}'", path.display())]
  MissingKey { key: String, path: PathBuf },

  #[error("Expecting version of VERSION-RELEASE, got '{version}'")]
  InvalidVersionFormat { version: String },

  #[error("Failed to write '{}': {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("No version provider registered as '{name}'")]
  UnknownProvider { name: String },

  #[error("No handler registered for command '{command}'")]
  UnknownCommand { command: String },

  #[error("Invalid parameter '{argument}': expected key=value")]
  InvalidArgument { argument: String },

  #[error("Invalid step configuration '{}': {message}", path.display())]
  StepConfig { path: PathBuf, message: String },
}

impl BuildMetaError {
  pub fn missing_file(path: impl AsRef<Path>) -> Self {
    Self::MissingFile { path: path.as_ref().to_path_buf() }
  }

  pub fn read(path: impl AsRef<Path>, source: io::Error) -> Self {
    Self::Read { path: path.as_ref().to_path_buf(), source }
  }

  pub fn malformed_record(
    path: impl AsRef<Path>,
    line_number: usize,
    line: impl Into<String>,
  ) -> Self {
    Self::MalformedRecord { path: path.as_ref().to_path_buf(), line_number, line: line.into() }
  }

  pub fn missing_key(key: impl Into<String>, path: impl AsRef<Path>) -> Self {
    Self::MissingKey { key: key.into(), path: path.as_ref().to_path_buf() }
  }

  pub fn invalid_version_format(version: impl Into<String>) -> Self {
    Self::InvalidVersionFormat { version: version.into() }
  }

  pub fn write(path: impl AsRef<Path>, source: io::Error) -> Self {
    Self::Write { path: path.as_ref().to_path_buf(), source }
  }

  pub fn unknown_provider(name: impl Into<String>) -> Self {
    Self::UnknownProvider { name: name.into() }
  }

  pub fn unknown_command(command: impl Into<String>) -> Self {
    Self::UnknownCommand { command: command.into() }
  }

  pub fn invalid_argument(argument: impl Into<String>) -> Self {
    Self::InvalidArgument { argument: argument.into() }
  }

  pub fn step_config(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
    Self::StepConfig { path: path.as_ref().to_path_buf(), message: message.into() }
  }

  /// Taxonomy name reported alongside the message
  pub fn kind(&self) -> &'static str {
    match self {
      Self::MissingFile { .. } => "MissingFileError",
      Self::Read { .. } => "ReadError",
      Self::MalformedRecord { .. } => "MalformedRecordError",
      Self::MissingKey { .. } => "MissingKeyError",
      Self::InvalidVersionFormat { .. } => "InvalidVersionFormatError",
      Self::Write { .. } => "WriteError",
      Self::UnknownProvider { .. } => "UnknownProviderError",
      Self::UnknownCommand { .. } => "UnknownCommandError",
      Self::InvalidArgument { .. } => "InvalidArgumentError",
      Self::StepConfig { .. } => "StepConfigError",
    }
  }

  /// Process exit status for this failure. 1 is reserved for unexpected
  /// errors and 2 for clap usage errors.
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::MissingFile { .. } => 10,
      Self::MalformedRecord { .. } => 11,
      Self::MissingKey { .. } => 12,
      Self::InvalidVersionFormat { .. } => 13,
      Self::Write { .. } => 14,
      Self::UnknownProvider { .. } => 15,
      Self::UnknownCommand { .. } => 16,
      Self::InvalidArgument { .. } => 17,
      Self::Read { .. } => 18,
      Self::StepConfig { .. } => 19,
    }
  }
}
