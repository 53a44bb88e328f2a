// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Static report configuration: project targets, internal organizations, timeframes, endpoints
// role: config/file
// inputs: Optional JSON config file; built-in defaults otherwise
// outputs: ConfigFile (raw), Target list, resolved Timeframes
// invariants:
// - Unknown JSON keys are rejected
// - A target is `org` or `org/repo`, both segments non-empty
// - Every timeframe's part lies inside its whole; bad literals fail before any network call
// errors: anyhow with file path / target / label context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::window::{DateWindow, LabeledWindow, Timeframe};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
  /// Every repository in the organization.
  Org(String),
  Repo { owner: String, repo: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid project `{0}`: expected `org` or `org/repo`")]
pub struct TargetError(pub String);

impl FromStr for Target {
  type Err = TargetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('/').collect();
    match parts.as_slice() {
      [org] if !org.is_empty() => Ok(Target::Org(org.to_string())),
      [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Target::Repo {
        owner: owner.to_string(),
        repo: repo.to_string(),
      }),
      _ => Err(TargetError(s.to_string())),
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Target::Org(org) => write!(f, "{}", org),
      Target::Repo { owner, repo } => write!(f, "{}/{}", owner, repo),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSpec {
  pub label: String,
  #[serde(default)]
  pub start: Option<String>,
  #[serde(default)]
  pub end: Option<String>,
}

impl WindowSpec {
  fn new(label: &str, start: &str, end: &str) -> Self {
    Self {
      label: label.into(),
      start: Some(start.into()),
      end: Some(end.into()),
    }
  }

  pub fn resolve(&self) -> Result<LabeledWindow> {
    let window = DateWindow::from_literals(self.start.as_deref(), self.end.as_deref())
      .with_context(|| format!("window `{}`", self.label))?;
    Ok(LabeledWindow {
      label: self.label.clone(),
      window,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeframeSpec {
  pub part: WindowSpec,
  pub whole: WindowSpec,
}

impl TimeframeSpec {
  pub fn resolve(&self) -> Result<Timeframe> {
    let tf = Timeframe::new(self.part.resolve()?, self.whole.resolve()?)?;
    Ok(tf)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ConfigFile {
  pub projects: Vec<String>,
  pub internal_orgs: Vec<String>,
  pub timeframes: Vec<TimeframeSpec>,
  pub api_url: String,
  pub cache_dir: String,
  pub token_file: String,
}

impl Default for ConfigFile {
  fn default() -> Self {
    Self {
      projects: ["pivotal/kpack", "concourse", "paketo-buildpacks", "buildpacks"]
        .into_iter()
        .map(String::from)
        .collect(),
      internal_orgs: ["pivotal", "pivotal-legacy", "vmware", "vmware-tanzu"]
        .into_iter()
        .map(String::from)
        .collect(),
      timeframes: vec![TimeframeSpec {
        part: WindowSpec::new("Q3FY21", "8/1/2020", "10/31/2020"),
        whole: WindowSpec::new("FY21", "2/1/2020", "10/31/2020"),
      }],
      api_url: "https://api.github.com/".into(),
      cache_dir: "~/.cache".into(),
      token_file: "~/.secrets/github-reports".into(),
    }
  }
}

impl ConfigFile {
  pub fn load(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: ConfigFile =
      serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
  }

  pub fn targets(&self) -> Result<Vec<Target>> {
    parse_targets(&self.projects)
  }

  pub fn resolve_timeframes(&self) -> Result<Vec<Timeframe>> {
    self
      .timeframes
      .iter()
      .map(|t| t.resolve().with_context(|| format!("timeframe `{}`", t.part.label)))
      .collect()
  }
}

pub fn parse_targets(raw: &[String]) -> Result<Vec<Target>> {
  raw
    .iter()
    .map(|s| s.parse::<Target>().map_err(anyhow::Error::from))
    .collect()
}
