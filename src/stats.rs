// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Median review duration and median first-response latency over a pull request collection
// role: aggregation/stats
// inputs: Pull requests (with their comments for response latency); optional window; injected `now`
// outputs: Whole days (review) and whole seconds (first response); 0 for empty input
// invariants:
// - Effective close = closed_at, else merged_at, else window end, else now
// - Qualifying response = earliest comment by a User other than the pull's author
// - Without a qualifying comment the response instant is closed_at, else now
// - Median: middle element, or mean of the two middle elements; floor applied after the median
// errors: None; empty input yields 0
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{AuthorType, PullDiscussion, PullRequest};
use crate::window::{DateWindow, Timestamp};

const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn median(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }

  let mut sorted = values.to_vec();
  sorted.sort_by(|a, b| a.total_cmp(b));

  let mid = sorted.len() / 2;
  if sorted.len() % 2 == 0 {
    Some((sorted[mid - 1] + sorted[mid]) / 2.0)
  } else {
    Some(sorted[mid])
  }
}

pub fn effective_close(pull: &PullRequest, window: Option<&DateWindow>, now: Timestamp) -> Timestamp {
  pull
    .closed_at
    .or(pull.merged_at)
    .or_else(|| window.and_then(DateWindow::end))
    .unwrap_or(now)
}

pub fn review_seconds(pull: &PullRequest, window: Option<&DateWindow>, now: Timestamp) -> i64 {
  (effective_close(pull, window, now) - pull.created_at).num_seconds()
}

pub fn median_review_duration_days<'p, I>(pulls: I, window: Option<&DateWindow>, now: Timestamp) -> i64
where
  I: IntoIterator<Item = &'p PullRequest>,
{
  let secs: Vec<f64> = pulls
    .into_iter()
    .map(|p| review_seconds(p, window, now) as f64)
    .collect();

  median(&secs).map_or(0, |m| (m / SECONDS_PER_DAY).floor() as i64)
}

/// Instant a pull first heard from someone else.
pub fn first_response_at(discussion: &PullDiscussion, now: Timestamp) -> Timestamp {
  let pull = &discussion.pull;
  discussion
    .comments
    .iter()
    .filter(|c| c.author_type == AuthorType::User)
    .filter(|c| c.author_login != pull.author_login)
    .map(|c| c.created_at)
    .min()
    .or(pull.closed_at)
    .unwrap_or(now)
}

pub fn median_first_response_seconds(discussions: &[PullDiscussion], now: Timestamp) -> i64 {
  let secs: Vec<f64> = discussions
    .iter()
    .map(|d| (first_response_at(d, now) - d.pull.created_at).num_seconds() as f64)
    .collect();

  median(&secs).map_or(0, |m| m.floor() as i64)
}
