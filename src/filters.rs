// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Classify commits and pull requests against a DateWindow; derive contributor sets
// role: aggregation/filters
// inputs: Decoded records; optional DateWindow; MembershipIndex for internal/external split
// outputs: Order-preserving filtered Vecs; BTreeSet of contributor logins
// invariants:
// - Commits: author present, author type User, authored_at point-in-range
// - Pulls: created/closed interval overlaps the window (two-sided bounds check)
// - An absent window keeps everything that passes the non-date checks
// errors: Only membership resolution can fail (FetchError)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;

use crate::github::error::FetchError;
use crate::membership::MembershipIndex;
use crate::model::{AuthorType, Commit, PullRequest};
use crate::window::{interval_overlaps, point_in_range, DateWindow};

pub fn filter_commits<'c>(commits: &'c [Commit], window: Option<&DateWindow>) -> Vec<&'c Commit> {
  commits
    .iter()
    .filter(|c| c.author_login.is_some())
    .filter(|c| c.author_type == AuthorType::User)
    .filter(|c| point_in_range(c.authored_at, window))
    .collect()
}

pub fn filter_pull_requests<'p>(pulls: &'p [PullRequest], window: Option<&DateWindow>) -> Vec<&'p PullRequest> {
  pulls
    .iter()
    .filter(|p| interval_overlaps(Some(p.created_at), p.closed_at, window))
    .collect()
}

/// Distinct author logins among commits that survive `filter_commits`.
pub fn contributors(commits: &[Commit], window: Option<&DateWindow>) -> BTreeSet<String> {
  filter_commits(commits, window)
    .into_iter()
    .filter_map(|c| c.author_login.clone())
    .collect()
}

/// Pulls opened by someone outside every internal organization.
pub fn external_pulls<'p>(
  pulls: &[&'p PullRequest],
  membership: &MembershipIndex<'_>,
) -> Result<Vec<&'p PullRequest>, FetchError> {
  let mut out = Vec::new();
  for p in pulls {
    if !membership.is_internal(&p.author_login)? {
      out.push(*p);
    }
  }
  Ok(out)
}
