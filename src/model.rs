// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed records (commits, pull requests, comments, repositories, members) decoded from API JSON
// role: model/types
// inputs: serde_json::Value items as returned by the paginated fetch layer
// outputs: Immutable typed records; decode_all skips malformed records with a warning
// invariants:
// - Every decoded record carries parsed timestamps only; raw date strings never leak downstream
// - A present-but-unparseable date excludes the whole record (logged with kind, field, raw value)
// - Missing pull/comment author logins default to "anonymous"
// errors: RecordError per record; decode_all never fails as a whole
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::ext::serde_json::JsonFetch;
use crate::window::{parse_date, parse_optional_date, DateParseError, Timestamp};

pub const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Error)]
pub enum RecordError {
  #[error("missing field `{0}`")]
  MissingField(&'static str),
  #[error("field `{field}`: {source}")]
  BadDate {
    field: &'static str,
    #[source]
    source: DateParseError,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorType {
  User,
  Other,
}

impl AuthorType {
  fn from_api(raw: Option<&str>) -> Self {
    match raw {
      Some("User") => AuthorType::User,
      _ => AuthorType::Other,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
  pub sha: String,
  pub author_login: Option<String>,
  pub author_type: AuthorType,
  pub authored_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
  pub number: i64,
  pub author_login: String,
  pub created_at: Timestamp,
  /// `None` while the pull request is still open.
  pub closed_at: Option<Timestamp>,
  pub merged_at: Option<Timestamp>,
  pub comments_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
  pub author_login: String,
  pub author_type: AuthorType,
  pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
  pub login: String,
}

/// A pull request together with its comment thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullDiscussion {
  pub pull: PullRequest,
  pub comments: Vec<Comment>,
}

pub trait FromApi: Sized {
  const KIND: &'static str;

  fn from_api(v: &Value) -> Result<Self, RecordError>;
}

fn required_date(v: &Value, path: &'static str) -> Result<Timestamp, RecordError> {
  let raw = v.fetch(path).as_str().ok_or(RecordError::MissingField(path))?;
  parse_date(raw).map_err(|source| RecordError::BadDate { field: path, source })
}

fn optional_date(v: &Value, path: &'static str) -> Result<Option<Timestamp>, RecordError> {
  parse_optional_date(v.fetch(path).as_str()).map_err(|source| RecordError::BadDate { field: path, source })
}

fn login_or_anonymous(v: &Value, path: &str) -> String {
  v.fetch(path).as_str().unwrap_or(ANONYMOUS).to_string()
}

impl FromApi for Commit {
  const KIND: &'static str = "commit";

  fn from_api(v: &Value) -> Result<Self, RecordError> {
    let authored_at = required_date(v, "commit.author.date")?;

    Ok(Commit {
      sha: v.fetch("sha").to::<String>().unwrap_or_default(),
      author_login: v.fetch("author.login").to::<String>(),
      author_type: AuthorType::from_api(v.fetch("author.type").as_str()),
      authored_at,
    })
  }
}

impl FromApi for PullRequest {
  const KIND: &'static str = "pull request";

  fn from_api(v: &Value) -> Result<Self, RecordError> {
    let number = v.fetch("number").to::<i64>().ok_or(RecordError::MissingField("number"))?;
    let created_at = required_date(v, "created_at")?;
    let closed_at = optional_date(v, "closed_at")?;
    let merged_at = optional_date(v, "merged_at")?;

    Ok(PullRequest {
      number,
      author_login: login_or_anonymous(v, "user.login"),
      created_at,
      closed_at,
      merged_at,
      comments_url: v.fetch("_links.comments.href").to::<String>(),
    })
  }
}

impl FromApi for Comment {
  const KIND: &'static str = "comment";

  fn from_api(v: &Value) -> Result<Self, RecordError> {
    Ok(Comment {
      author_login: login_or_anonymous(v, "user.login"),
      author_type: AuthorType::from_api(v.fetch("user.type").as_str()),
      created_at: required_date(v, "created_at")?,
    })
  }
}

impl FromApi for Repository {
  const KIND: &'static str = "repository";

  fn from_api(v: &Value) -> Result<Self, RecordError> {
    let name = v.fetch("name").to::<String>().ok_or(RecordError::MissingField("name"))?;
    Ok(Repository { name })
  }
}

impl FromApi for Member {
  const KIND: &'static str = "member";

  fn from_api(v: &Value) -> Result<Self, RecordError> {
    let login = v.fetch("login").to::<String>().ok_or(RecordError::MissingField("login"))?;
    Ok(Member { login })
  }
}

/// Decode every item, skipping (and logging) the ones that cannot be trusted.
pub fn decode_all<T: FromApi>(items: &[Value]) -> Vec<T> {
  let mut out = Vec::with_capacity(items.len());

  for (idx, item) in items.iter().enumerate() {
    match T::from_api(item) {
      Ok(record) => out.push(record),
      Err(err) => warn!(kind = T::KIND, index = idx, "skipping record: {}", err),
    }
  }

  out
}
