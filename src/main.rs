use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod ext;
mod filters;
mod github;
mod membership;
mod model;
mod report;
mod stats;
mod util;
mod window;

use crate::cli::{normalize, Cli};
use crate::github::api::HttpApi;
use crate::github::cache::RequestCache;
use crate::github::paged::PagedFetcher;
use crate::membership::MembershipIndex;
use crate::report::ReportAssembler;

fn init_logging(verbose: bool) {
  let default = if verbose {
    "project_activity_report=debug"
  } else {
    "project_activity_report=info"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_logging(cli.verbose);

  // Phase 1: normalize CLI + config (fails before any network call)
  let cfg = normalize(cli)?;
  let now = util::effective_now(util::parse_now_override(cfg.now_override.as_deref())?);
  let token = util::read_token(&cfg.token_file)?;

  info!(
    projects = cfg.targets.len(),
    timeframes = cfg.timeframes.len(),
    cache = %cfg.cache_dir.display(),
    "starting report"
  );

  // Phase 2: wire transport → pagination → durable cache
  let fetcher = PagedFetcher::new(HttpApi::new(token), &cfg.api_url);
  let cache = RequestCache::new(&cfg.cache_dir, fetcher);
  let membership = MembershipIndex::new(&cache, cfg.internal_orgs.clone());

  // Phase 3: report each project to stdout as it completes
  let assembler = ReportAssembler::new(&cache, &membership, &cfg.timeframes, now);
  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  assembler.run(&cfg.targets, &mut out)
}
