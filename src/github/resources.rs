// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed accessors for the handful of endpoints the report reads
// role: github/resources
// inputs: Any ResourceSource (normally the RequestCache); owner/repo/org names
// outputs: Decoded records (Commit, PullRequest, Comment, Repository, Member)
// invariants:
// - Paths: repos/{o}/{r}/commits, repos/{o}/{r}/pulls?state=all, orgs/{org}/repos, orgs/{org}/members
// - Comments come from the pull's own link; a pull without one has no comments
// errors: FetchError propagates; malformed records are skipped by model::decode_all
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::github::error::FetchError;
use crate::github::ResourceSource;
use crate::model::{decode_all, Comment, Commit, Member, PullRequest, Repository};

pub fn commits_path(owner: &str, repo: &str) -> String {
  format!("repos/{}/{}/commits", owner, repo)
}

pub fn pulls_path(owner: &str, repo: &str) -> String {
  format!("repos/{}/{}/pulls?state=all", owner, repo)
}

pub fn org_repos_path(org: &str) -> String {
  format!("orgs/{}/repos", org)
}

pub fn org_members_path(org: &str) -> String {
  format!("orgs/{}/members", org)
}

pub fn repo_commits(source: &dyn ResourceSource, owner: &str, repo: &str) -> Result<Vec<Commit>, FetchError> {
  Ok(decode_all(&source.fetch(&commits_path(owner, repo))?))
}

pub fn repo_pulls(source: &dyn ResourceSource, owner: &str, repo: &str) -> Result<Vec<PullRequest>, FetchError> {
  Ok(decode_all(&source.fetch(&pulls_path(owner, repo))?))
}

pub fn org_repos(source: &dyn ResourceSource, org: &str) -> Result<Vec<Repository>, FetchError> {
  Ok(decode_all(&source.fetch(&org_repos_path(org))?))
}

pub fn org_members(source: &dyn ResourceSource, org: &str) -> Result<Vec<Member>, FetchError> {
  Ok(decode_all(&source.fetch(&org_members_path(org))?))
}

pub fn pull_comments(source: &dyn ResourceSource, pull: &PullRequest) -> Result<Vec<Comment>, FetchError> {
  match &pull.comments_url {
    Some(url) => Ok(decode_all(&source.fetch(url)?)),
    None => Ok(Vec::new()),
  }
}
