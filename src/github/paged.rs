// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Retrieve every page of a resource by following `next` links and concatenate the items
// role: github/pagination
// inputs: Resource path relative to the API base (or an absolute URL handed out by the API)
// outputs: One ordered Vec<Value> across all pages
// side_effects: Sequential network calls through the injected GithubApi
// invariants:
// - First request carries per_page=100; later requests use the server's `next` URL verbatim
// - Page order and within-page order are preserved; total = sum of page sizes
// - The first failing page aborts the whole fetch (no partial result)
// errors: FetchError from the transport, unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::Value;
use tracing::{debug, info};

use crate::github::api::GithubApi;
use crate::github::error::FetchError;
use crate::github::ResourceSource;

pub const PER_PAGE: u32 = 100;

pub struct PagedFetcher<A: GithubApi> {
  api: A,
  base_url: String,
}

impl<A: GithubApi> PagedFetcher<A> {
  pub fn new(api: A, base_url: &str) -> Self {
    let base_url = if base_url.ends_with('/') {
      base_url.to_string()
    } else {
      format!("{}/", base_url)
    };
    Self { api, base_url }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Absolute URL of the first page, with the page-size parameter attached.
  pub fn first_page_url(&self, path: &str) -> String {
    let url = if path.starts_with("http://") || path.starts_with("https://") {
      path.to_string()
    } else {
      format!("{}{}", self.base_url, path.trim_start_matches('/'))
    };
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}per_page={}", url, sep, PER_PAGE)
  }

  pub fn fetch_all(&self, path: &str) -> Result<Vec<Value>, FetchError> {
    info!(path, "fetching");

    let mut results: Vec<Value> = Vec::new();
    let mut next = Some(self.first_page_url(path));
    let mut pages = 0usize;

    while let Some(url) = next {
      let page = self.api.get_page(&url)?;
      pages += 1;
      debug!(path, page = pages, items = page.items.len(), "page received");

      results.extend(page.items);
      next = page.next;
    }

    info!(path, pages, items = results.len(), "fetched");
    Ok(results)
  }
}

impl<A: GithubApi> ResourceSource for PagedFetcher<A> {
  fn fetch(&self, path: &str) -> Result<Vec<Value>, FetchError> {
    self.fetch_all(path)
  }
}
