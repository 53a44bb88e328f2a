use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{parse_targets, ConfigFile, Target};
use crate::util;
use crate::window::Timeframe;

#[derive(Parser, Debug)]
#[command(
    name = "project-activity-report",
    version,
    about = "Summarize GitHub contributor and pull-request activity per fiscal timeframe",
    long_about = None
)]
pub struct Cli {
  /// JSON config file (projects, internal_orgs, timeframes, api_url, cache_dir, token_file)
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// Project to report on: `org` (all repositories) or `org/repo`. Repeatable; replaces the configured list.
  #[arg(long = "project", value_name = "ORG[/REPO]")]
  pub projects: Vec<String>,

  /// Organization whose members count as internal. Repeatable; replaces the configured list.
  #[arg(long = "internal-org", value_name = "ORG")]
  pub internal_orgs: Vec<String>,

  /// Base URL of the REST API
  #[arg(long)]
  pub api_url: Option<String>,

  /// Directory holding one JSON file per fetched resource
  #[arg(long)]
  pub cache_dir: Option<String>,

  /// File containing the API token
  #[arg(long)]
  pub token_file: Option<String>,

  /// Debug-level logging on stderr
  #[arg(short, long)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for open pull requests (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub targets: Vec<Target>,
  pub internal_orgs: Vec<String>,
  pub timeframes: Vec<Timeframe>,
  pub api_url: String,
  pub cache_dir: PathBuf,
  pub token_file: PathBuf,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let file = match &cli.config {
    Some(path) => ConfigFile::load(path)?,
    None => ConfigFile::default(),
  };

  let targets = if cli.projects.is_empty() {
    file.targets()?
  } else {
    parse_targets(&cli.projects)?
  };

  let internal_orgs = if cli.internal_orgs.is_empty() {
    file.internal_orgs.clone()
  } else {
    cli.internal_orgs
  };

  let timeframes = file.resolve_timeframes().context("resolving timeframes")?;

  Ok(EffectiveConfig {
    targets,
    internal_orgs,
    timeframes,
    api_url: cli.api_url.unwrap_or(file.api_url),
    cache_dir: util::expand_home(cli.cache_dir.as_deref().unwrap_or(&file.cache_dir)),
    token_file: util::expand_home(cli.token_file.as_deref().unwrap_or(&file.token_file)),
    now_override: cli.now_override,
  })
}
