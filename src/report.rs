// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate fetch → filter → stats per project target and timeframe; render the text report
// role: report/orchestrator
// inputs: Targets, resolved Timeframes, injected ResourceSource and MembershipIndex, `now`
// outputs: ProjectSummary values; text blocks streamed to any io::Write
// side_effects: Network/cache reads through the source; writes report text to the given sink
// invariants:
// - Org heading is "{org} ({n} repos)"; repo heading is "{org}/{repo}"
// - Whole-window contributors, then part-window lines, each indented three spaces
// - Comments are fetched only for pulls inside the part window
// - Each project is written as soon as it is summarized
// errors: FetchError and io errors propagate with the target named in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Target;
use crate::filters::{contributors, external_pulls, filter_pull_requests};
use crate::github::resources::{org_repos, pull_comments, repo_commits, repo_pulls};
use crate::github::ResourceSource;
use crate::membership::MembershipIndex;
use crate::model::{Commit, PullDiscussion, PullRequest};
use crate::stats::{median_first_response_seconds, median_review_duration_days};
use crate::window::{Timeframe, Timestamp};

/// Raw records gathered for one target.
#[derive(Debug, Default)]
pub struct ProjectData {
  pub heading: String,
  pub commits: Vec<Commit>,
  pub pulls: Vec<PullRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeSummary {
  pub whole_label: String,
  pub part_label: String,
  pub whole_contributors: usize,
  pub part_contributors: usize,
  pub pull_requests: usize,
  pub pull_requests_by_others: usize,
  pub median_review_days: i64,
  pub median_response_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
  pub heading: String,
  pub timeframes: Vec<TimeframeSummary>,
}

pub struct ReportAssembler<'a> {
  source: &'a dyn ResourceSource,
  membership: &'a MembershipIndex<'a>,
  timeframes: &'a [Timeframe],
  now: Timestamp,
}

impl<'a> ReportAssembler<'a> {
  pub fn new(
    source: &'a dyn ResourceSource,
    membership: &'a MembershipIndex<'a>,
    timeframes: &'a [Timeframe],
    now: Timestamp,
  ) -> Self {
    Self {
      source,
      membership,
      timeframes,
      now,
    }
  }

  pub fn collect(&self, target: &Target) -> Result<ProjectData> {
    match target {
      Target::Repo { owner, repo } => Ok(ProjectData {
        heading: format!("{}/{}", owner, repo),
        commits: repo_commits(self.source, owner, repo)?,
        pulls: repo_pulls(self.source, owner, repo)?,
      }),
      Target::Org(org) => {
        let repos = org_repos(self.source, org)?;
        let mut data = ProjectData {
          heading: format!("{} ({} repos)", org, repos.len()),
          ..ProjectData::default()
        };
        for r in &repos {
          data.commits.extend(repo_commits(self.source, org, &r.name)?);
          data.pulls.extend(repo_pulls(self.source, org, &r.name)?);
        }
        Ok(data)
      }
    }
  }

  pub fn summarize(&self, data: &ProjectData, timeframe: &Timeframe) -> Result<TimeframeSummary> {
    let whole = timeframe.whole();
    let part = timeframe.part();

    let pulls = filter_pull_requests(&data.pulls, Some(&part.window));
    let by_others = external_pulls(&pulls, self.membership)?;

    let mut discussions = Vec::with_capacity(pulls.len());
    for p in &pulls {
      discussions.push(PullDiscussion {
        pull: (*p).clone(),
        comments: pull_comments(self.source, p)?,
      });
    }

    Ok(TimeframeSummary {
      whole_label: whole.label.clone(),
      part_label: part.label.clone(),
      whole_contributors: contributors(&data.commits, Some(&whole.window)).len(),
      part_contributors: contributors(&data.commits, Some(&part.window)).len(),
      pull_requests: pulls.len(),
      pull_requests_by_others: by_others.len(),
      median_review_days: median_review_duration_days(pulls.iter().copied(), Some(&part.window), self.now),
      median_response_seconds: median_first_response_seconds(&discussions, self.now),
    })
  }

  pub fn project(&self, target: &Target) -> Result<ProjectSummary> {
    info!(project = %target, "collecting");
    let data = self.collect(target)?;

    let timeframes = self
      .timeframes
      .iter()
      .map(|tf| self.summarize(&data, tf))
      .collect::<Result<Vec<_>>>()?;

    Ok(ProjectSummary {
      heading: data.heading,
      timeframes,
    })
  }

  pub fn run<W: Write>(&self, targets: &[Target], out: &mut W) -> Result<()> {
    for target in targets {
      let summary = self.project(target).with_context(|| format!("reporting on {}", target))?;
      out.write_all(render_text(&summary).as_bytes())?;
      out.flush()?;
    }
    Ok(())
  }
}

pub fn render_text(summary: &ProjectSummary) -> String {
  let mut s = String::new();
  s.push_str(&summary.heading);
  s.push('\n');

  for tf in &summary.timeframes {
    let lines = [
      format!("{} contributors for {}", tf.whole_contributors, tf.whole_label),
      format!("{} contributors for {}", tf.part_contributors, tf.part_label),
      format!("{} pull requests for {}", tf.pull_requests, tf.part_label),
      format!("{} pull requests by others for {}", tf.pull_requests_by_others, tf.part_label),
      format!(
        "{} median number of days pull requests were in review in {}",
        tf.median_review_days, tf.part_label
      ),
      format!(
        "{} median response time for pull requests in {}",
        friendly_duration(tf.median_response_seconds),
        tf.part_label
      ),
    ];
    for line in lines {
      s.push_str("   ");
      s.push_str(&line);
      s.push('\n');
    }
  }

  s
}

pub fn friendly_duration(seconds: i64) -> String {
  if seconds < 90 {
    return format!("{} seconds", seconds);
  }
  let minutes = seconds.div_euclid(60);
  if minutes < 90 {
    return format!("{} minutes", minutes);
  }
  let hours = minutes.div_euclid(60);
  if hours < 24 {
    return format!("{} hours", hours);
  }
  format!("{} days", hours.div_euclid(24))
}
