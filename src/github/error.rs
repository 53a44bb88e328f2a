use std::path::PathBuf;

use thiserror::Error;

/// Failures anywhere between the wire and the on-disk cache. None of them are retried.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("GET {url} returned HTTP {status}")]
  Status { url: String, status: u16 },
  #[error("GET {url} failed")]
  Transport {
    url: String,
    #[source]
    source: Box<ureq::Error>,
  },
  #[error("GET {url} returned a body that is not JSON")]
  Decode {
    url: String,
    #[source]
    source: Box<ureq::Error>,
  },
  #[error("GET {url} returned a Link header that is not ASCII")]
  LinkHeader { url: String },
  #[error("cache entry {}", path.display())]
  CacheIo {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("cache entry {} is not a JSON sequence", path.display())]
  CacheDecode {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl FetchError {
  /// Classify a ureq failure for `url`.
  pub fn from_ureq(url: &str, err: ureq::Error) -> Self {
    match err {
      ureq::Error::StatusCode(status) => FetchError::Status {
        url: url.to_string(),
        status,
      },
      ureq::Error::Json(_) => FetchError::Decode {
        url: url.to_string(),
        source: Box::new(err),
      },
      other => FetchError::Transport {
        url: url.to_string(),
        source: Box::new(other),
      },
    }
  }
}
