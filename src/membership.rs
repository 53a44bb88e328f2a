// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Classify logins as internal (member of any configured organization) or external
// role: aggregation/membership
// inputs: Injected ResourceSource (normally the RequestCache); fixed list of organizations
// outputs: Frozen BTreeSet of internal logins; bool classification per login
// side_effects: First resolution fetches every organization's member list through the source
// invariants:
// - The set is built at most once per index and never changes afterwards
// - A failed build leaves the index unresolved so a later call can try again
// errors: FetchError from the source
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;

use once_cell::unsync::OnceCell;
use tracing::info;

use crate::github::error::FetchError;
use crate::github::resources::org_members;
use crate::github::ResourceSource;

pub struct MembershipIndex<'a> {
  source: &'a dyn ResourceSource,
  orgs: Vec<String>,
  members: OnceCell<BTreeSet<String>>,
}

impl<'a> MembershipIndex<'a> {
  pub fn new(source: &'a dyn ResourceSource, orgs: Vec<String>) -> Self {
    Self {
      source,
      orgs,
      members: OnceCell::new(),
    }
  }

  pub fn is_resolved(&self) -> bool {
    self.members.get().is_some()
  }

  /// Union of every organization's members, built on first use.
  pub fn resolve(&self) -> Result<&BTreeSet<String>, FetchError> {
    self.members.get_or_try_init(|| {
      let mut set = BTreeSet::new();
      for org in &self.orgs {
        set.extend(org_members(self.source, org)?.into_iter().map(|m| m.login));
      }
      info!(orgs = self.orgs.len(), members = set.len(), "membership resolved");
      Ok(set)
    })
  }

  pub fn is_internal(&self, login: &str) -> Result<bool, FetchError> {
    Ok(self.resolve()?.contains(login))
  }
}
