use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// Window types and the date forms they are built from.

pub type Timestamp = DateTime<Utc>;

static RE_CONFIG_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());
static RE_API_DATE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
  #[error("unrecognized date {0:?} (expected M/D/YYYY or YYYY-MM-DDTHH:MM:SSZ)")]
  Unrecognized(String),
  #[error("date {0:?} is not a valid calendar date")]
  OutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
  #[error("window start {start} is after end {end}")]
  Inverted { start: Timestamp, end: Timestamp },
  #[error("window {part:?} is not enclosed by {whole:?}")]
  NotEnclosed { part: String, whole: String },
  #[error(transparent)]
  Date(#[from] DateParseError),
}

/// Parse one of the two accepted textual forms.
///
/// `M/D/YYYY` comes from configuration and lands on midnight UTC; the ISO form is what the
/// API returns. Anything else is an error, never a panic.
pub fn parse_date(raw: &str) -> Result<Timestamp, DateParseError> {
  if let Some(caps) = RE_CONFIG_DATE.captures(raw) {
    let month: u32 = caps[1].parse().map_err(|_| DateParseError::OutOfRange(raw.to_string()))?;
    let day: u32 = caps[2].parse().map_err(|_| DateParseError::OutOfRange(raw.to_string()))?;
    let year: i32 = caps[3].parse().map_err(|_| DateParseError::OutOfRange(raw.to_string()))?;

    return NaiveDate::from_ymd_opt(year, month, day)
      .and_then(|d| d.and_hms_opt(0, 0, 0))
      .map(|ndt| ndt.and_utc())
      .ok_or_else(|| DateParseError::OutOfRange(raw.to_string()));
  }

  if RE_API_DATE.is_match(raw) {
    return NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ")
      .map(|ndt| ndt.and_utc())
      .map_err(|_| DateParseError::OutOfRange(raw.to_string()));
  }

  Err(DateParseError::Unrecognized(raw.to_string()))
}

/// Like `parse_date`, but a missing (JSON `null`) value is `Ok(None)`.
pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<Timestamp>, DateParseError> {
  raw.map(parse_date).transpose()
}

/// Inclusive interval; a missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateWindow {
  start: Option<Timestamp>,
  end: Option<Timestamp>,
}

impl DateWindow {
  pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Result<Self, WindowError> {
    if let (Some(s), Some(e)) = (start, end) {
      if s > e {
        return Err(WindowError::Inverted { start: s, end: e });
      }
    }
    Ok(Self { start, end })
  }

  pub fn from_literals(start: Option<&str>, end: Option<&str>) -> Result<Self, WindowError> {
    Self::new(parse_optional_date(start)?, parse_optional_date(end)?)
  }

  pub fn start(&self) -> Option<Timestamp> {
    self.start
  }

  pub fn end(&self) -> Option<Timestamp> {
    self.end
  }

  pub fn contains(&self, t: Timestamp) -> bool {
    if self.start.is_some_and(|s| t < s) {
      return false;
    }
    if self.end.is_some_and(|e| t > e) {
      return false;
    }
    true
  }

  /// Two-sided bounds check: an item is out only when it opened after the window ended or
  /// closed before it started. An open side never excludes.
  pub fn overlaps(&self, opened: Option<Timestamp>, closed: Option<Timestamp>) -> bool {
    if let (Some(o), Some(e)) = (opened, self.end) {
      if o > e {
        return false;
      }
    }
    if let (Some(c), Some(s)) = (closed, self.start) {
      if c < s {
        return false;
      }
    }
    true
  }

  pub fn encloses(&self, other: &DateWindow) -> bool {
    let start_ok = match (self.start, other.start) {
      (None, _) => true,
      (Some(_), None) => false,
      (Some(outer), Some(inner)) => outer <= inner,
    };
    let end_ok = match (self.end, other.end) {
      (None, _) => true,
      (Some(_), None) => false,
      (Some(outer), Some(inner)) => inner <= outer,
    };
    start_ok && end_ok
  }
}

/// An absent window selects everything.
pub fn point_in_range(t: Timestamp, window: Option<&DateWindow>) -> bool {
  window.map_or(true, |w| w.contains(t))
}

pub fn interval_overlaps(opened: Option<Timestamp>, closed: Option<Timestamp>, window: Option<&DateWindow>) -> bool {
  window.map_or(true, |w| w.overlaps(opened, closed))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledWindow {
  pub label: String,
  pub window: DateWindow,
}

/// A reporting period (`part`, e.g. a quarter) and the fiscal year that contains it (`whole`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeframe {
  part: LabeledWindow,
  whole: LabeledWindow,
}

impl Timeframe {
  pub fn new(part: LabeledWindow, whole: LabeledWindow) -> Result<Self, WindowError> {
    if !whole.window.encloses(&part.window) {
      return Err(WindowError::NotEnclosed {
        part: part.label,
        whole: whole.label,
      });
    }
    Ok(Self { part, whole })
  }

  pub fn part(&self) -> &LabeledWindow {
    &self.part
  }

  pub fn whole(&self) -> &LabeledWindow {
    &self.whole
  }
}
