// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for GitHub REST retrieval (transport, pagination, durable cache, typed resources)
// role: github/namespace
// outputs: ResourceSource seam shared by the cache, the fetcher, and test doubles
// invariants: Everything here is synchronous and sequential; no retries
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod cache;
pub mod error;
pub mod links;
pub mod paged;
pub mod resources;

use serde_json::Value;

use crate::github::error::FetchError;

/// Anything that can resolve a resource path into its full item sequence.
pub trait ResourceSource {
  fn fetch(&self, path: &str) -> Result<Vec<Value>, FetchError>;
}
