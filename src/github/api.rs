// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Single-page transport for the GitHub REST API behind a trait seam (HTTP via ureq, fakes in tests)
// role: github/transport
// inputs: Absolute request URL; credential token held by HttpApi
// outputs: Page { items (normalized sequence), next (Link rel="next") }
// side_effects: One blocking HTTPS GET per call
// invariants:
// - Sends `Authorization: token <credential>`; never logs the credential
// - Any non-2xx status is an error (no partial pages, no retry)
// - Body normalized to a sequence immediately (array | object | null)
// errors: FetchError::{Status, Transport, Decode, LinkHeader}
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::Value;
use tracing::debug;

use crate::ext::serde_json::into_sequence;
use crate::github::error::FetchError;
use crate::github::links::next_link;

pub const USER_AGENT: &str = concat!("project-activity-report/", env!("CARGO_PKG_VERSION"));

/// One page of an API listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
  pub items: Vec<Value>,
  pub next: Option<String>,
}

// --- Trait seam for the GitHub API ---
pub trait GithubApi {
  fn get_page(&self, url: &str) -> Result<Page, FetchError>;
}

impl<T: GithubApi + ?Sized> GithubApi for &T {
  fn get_page(&self, url: &str) -> Result<Page, FetchError> {
    (**self).get_page(url)
  }
}

/// The raw `Link` header, if any. An unreadable one is an error rather than a silent last page.
fn link_header<'h>(url: &str, headers: &'h ureq::http::HeaderMap) -> Result<Option<&'h str>, FetchError> {
  headers
    .get("link")
    .map(|v| {
      v.to_str().map_err(|_| FetchError::LinkHeader {
        url: url.to_string(),
      })
    })
    .transpose()
}

pub struct HttpApi {
  agent: ureq::Agent,
  token: String,
}

impl HttpApi {
  pub fn new(token: String) -> Self {
    let agent: ureq::Agent = ureq::Agent::config_builder().build().into();
    Self { agent, token }
  }
}

impl GithubApi for HttpApi {
  fn get_page(&self, url: &str) -> Result<Page, FetchError> {
    debug!(url, "GET");

    let mut resp = self
      .agent
      .get(url)
      .header("Accept", "application/vnd.github+json")
      .header("User-Agent", USER_AGENT)
      .header("Authorization", &format!("token {}", self.token))
      .call()
      .map_err(|e| FetchError::from_ureq(url, e))?;

    let next = next_link(link_header(url, resp.headers())?);
    let body: Value = resp
      .body_mut()
      .read_json::<Value>()
      .map_err(|e| FetchError::from_ureq(url, e))?;

    Ok(Page {
      items: into_sequence(body),
      next,
    })
  }
}
