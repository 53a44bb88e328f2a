// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse RFC 8288 style `Link` response headers into relation -> URL pairs
// role: github/pagination-links
// inputs: Raw `Link` header value, e.g. `<https://api/x?page=2>; rel="next", <...>; rel="last"`
// outputs: BTreeMap of relation name to absolute URL; next_link convenience
// invariants: Malformed entries are ignored, never fatal; URLs are returned verbatim (no base re-prefixing)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

// URLs are delimited by `<...>`, so commas inside them never split an entry.
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<([^>]*)>\s*;\s*rel="?([^";,]+)"?"#).unwrap());

pub fn parse_link_header(header: &str) -> BTreeMap<String, String> {
  RE_LINK
    .captures_iter(header)
    .map(|caps| (caps[2].trim().to_string(), caps[1].to_string()))
    .collect()
}

pub fn next_link(header: Option<&str>) -> Option<String> {
  header.and_then(|h| parse_link_header(h).remove("next"))
}
