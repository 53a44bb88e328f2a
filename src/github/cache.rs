// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Durable request cache: one pretty-printed JSON file per logical resource path
// role: github/cache
// inputs: Resource path (relative or absolute under the API base); cache directory
// outputs: Full multi-page Vec<Value> for the path, from memory, disk, or network (in that order)
// side_effects: Creates the cache directory; writes one file per unique path on first miss (staged, then renamed)
// invariants:
// - Key = path without the API base, `/` replaced by `_`; query string retained
// - Entries never expire and are never revalidated; removal is manual
// - A path reaches the network at most once per process, and not at all once its file exists
// - Concurrent processes may both miss and both write; last write wins
// errors: Transport errors and I/O/decode errors propagate unchanged (fail fast)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::github::api::GithubApi;
use crate::github::error::FetchError;
use crate::github::paged::PagedFetcher;
use crate::github::ResourceSource;

pub struct RequestCache<A: GithubApi> {
  dir: PathBuf,
  fetcher: PagedFetcher<A>,
  // Caches resolved entries per run to avoid re-reading files.
  memo: RefCell<HashMap<String, Vec<Value>>>,
}

impl<A: GithubApi> RequestCache<A> {
  pub fn new<P: AsRef<Path>>(dir: P, fetcher: PagedFetcher<A>) -> Self {
    Self {
      dir: dir.as_ref().to_path_buf(),
      fetcher,
      memo: RefCell::new(HashMap::new()),
    }
  }

  /// Stable file name for a resource path.
  pub fn cache_key(&self, path: &str) -> String {
    let rel = path.strip_prefix(self.fetcher.base_url()).unwrap_or(path);
    rel.trim_start_matches('/').replace('/', "_")
  }

  pub fn entry_path(&self, path: &str) -> PathBuf {
    self.dir.join(self.cache_key(path))
  }

  /// Whether `path` resolves without touching the network.
  pub fn is_cached(&self, path: &str) -> bool {
    self.memo.borrow().contains_key(&self.cache_key(path)) || self.entry_path(path).is_file()
  }

  pub fn fetch(&self, path: &str) -> Result<Vec<Value>, FetchError> {
    let key = self.cache_key(path);

    if let Some(hit) = self.memo.borrow().get(&key).cloned() {
      return Ok(hit);
    }

    let file = self.dir.join(&key);
    let items = if file.is_file() {
      debug!(path, file = %file.display(), "cache hit");
      read_entry(&file)?
    } else {
      let items = self.fetcher.fetch_all(path)?;
      write_entry(&self.dir, &file, &items)?;
      items
    };

    self.memo.borrow_mut().insert(key, items.clone());

    Ok(items)
  }
}

impl<A: GithubApi> ResourceSource for RequestCache<A> {
  fn fetch(&self, path: &str) -> Result<Vec<Value>, FetchError> {
    RequestCache::fetch(self, path)
  }
}

fn read_entry(file: &Path) -> Result<Vec<Value>, FetchError> {
  let bytes = std::fs::read(file).map_err(|source| FetchError::CacheIo {
    path: file.to_path_buf(),
    source,
  })?;

  serde_json::from_slice::<Vec<Value>>(&bytes).map_err(|source| FetchError::CacheDecode {
    path: file.to_path_buf(),
    source,
  })
}

fn write_entry(dir: &Path, file: &Path, items: &[Value]) -> Result<(), FetchError> {
  let io_err = |source: std::io::Error| FetchError::CacheIo {
    path: file.to_path_buf(),
    source,
  };

  std::fs::create_dir_all(dir).map_err(io_err)?;

  let text = serde_json::to_vec_pretty(items).map_err(|source| FetchError::CacheDecode {
    path: file.to_path_buf(),
    source,
  })?;

  // Readers only ever see a complete entry or none at all.
  let mut staged = tempfile::Builder::new()
    .prefix(".partial-")
    .tempfile_in(dir)
    .map_err(io_err)?;
  staged.write_all(&text).map_err(io_err)?;
  staged.as_file().sync_all().map_err(io_err)?;
  staged.persist(file).map_err(|e| io_err(e.error))?;

  debug!(file = %file.display(), items = items.len(), "cache entry written");

  Ok(())
}
