use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process;

use buildmeta::settings::parse_params;
use buildmeta::{dispatch, logging, BuildMetaError, Context, Settings};

/// Build pipeline utility for artifact version metadata
#[derive(Parser)]
#[command(name = "buildmeta")]
#[command(about = "Run a build pipeline command against artifact version metadata")]
#[command(version)]
struct Cli {
  /// Registered command to run (e.g. artifactSetVersion)
  command: String,

  /// Command parameters as key=value pairs
  #[arg(value_name = "KEY=VALUE")]
  params: Vec<String>,

  /// Properties file holding VERSION and RELEASE
  #[arg(long, env = "BUILDMETA_PROPERTIES_FILE", default_value = "build.properties")]
  properties_file: PathBuf,

  /// YAML file with per-step configuration
  #[arg(long, env = "BUILDMETA_STEP_CONFIG")]
  step_config: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() {
  let cli = Cli::parse();
  logging::init(cli.verbose);

  if let Err(err) = run(cli) {
    match err.downcast_ref::<BuildMetaError>() {
      Some(failure) => {
        logging::error(&format!("{}: {failure}", failure.kind()));
        process::exit(failure.exit_code());
      }
      None => {
        logging::error(&format!("{err:#}"));
        process::exit(1);
      }
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let settings = Settings { properties_file: cli.properties_file, step_config: cli.step_config };
  let params = parse_params(&cli.params)?;

  let context = Context::bootstrap(&settings)?;
  let output = dispatch(&context, &cli.command, &params)?;
  println!("{output}");
  Ok(())
}
