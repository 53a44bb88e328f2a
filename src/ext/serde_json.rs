// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path field access on API records and normalization of response bodies into sequences
// role: extension/serde_json
// outputs: JsonFetch trait (typed extraction) and into_sequence (single object | array | null -> Vec)
// invariants: No panics; missing paths and JSON null both yield None; into_sequence preserves array order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A located JSON value, read back through a typed second step.
pub struct JsonFetched<'a> {
  inner: Option<&'a Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self
      .inner
      .filter(|v| !v.is_null())
      .and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Borrow a string field without cloning the whole value.
  pub fn as_str(&self) -> Option<&'a str> {
    self.inner.and_then(Value::as_str)
  }
}

/// Fetch nested values via dotted paths like `"commit.author.date"`.
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}

/// Every response body becomes an ordered sequence: arrays keep their elements,
/// a lone object becomes one element, `null` becomes nothing.
pub fn into_sequence(body: Value) -> Vec<Value> {
  match body {
    Value::Array(items) => items,
    Value::Null => Vec::new(),
    other => vec![other],
  }
}
