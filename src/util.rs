// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for home-relative paths, credential loading, clock override, and man page rendering
// role: utilities/helpers
// inputs: Path strings; optional RFC3339 override; clap CommandFactory
// outputs: Expanded PathBufs, the trimmed token, the effective `now`, man page text
// side_effects: read_token reads one file
// invariants:
// - `~` / `~/...` expand against the user's home; other paths are left as given
// - The token is never logged; surrounding whitespace is stripped
// errors: Missing/empty token file and bad clock override are errors with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::CommandFactory;

use crate::window::Timestamp;

pub fn expand_home(raw: &str) -> PathBuf {
  if raw == "~" {
    return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
  }
  match (raw.strip_prefix("~/"), dirs::home_dir()) {
    (Some(rest), Some(home)) => home.join(rest),
    _ => PathBuf::from(raw),
  }
}

/// Load the API credential. A missing or empty file is fatal.
pub fn read_token(path: &Path) -> Result<String> {
  let raw = std::fs::read_to_string(path).with_context(|| format!("reading token file {}", path.display()))?;
  let token = raw.trim();
  if token.is_empty() {
    bail!("token file {} is empty", path.display());
  }
  Ok(token.to_string())
}

pub fn parse_now_override(raw: Option<&str>) -> Result<Option<Timestamp>> {
  raw
    .map(|s| {
      DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid --now-override `{}`", s))
    })
    .transpose()
}

/// Returns the effective "now" given an optional override.
///
/// Centralizes clock access so the stats engine never reads the wall clock itself.
pub fn effective_now(override_now: Option<Timestamp>) -> Timestamp {
  override_now.unwrap_or_else(Utc::now)
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
