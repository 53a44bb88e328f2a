use predicates::prelude::*;
use serde_json::json;
use test_support::{cmd_bin, tempdir, write_file, MockGithub};

#[test]
fn missing_token_file_is_fatal_before_any_request() {
  let server = MockGithub::start();
  let td = tempdir();
  let cfg = json!({
    "projects": ["acme/widgets"],
    "api_url": server.base_url(),
    "cache_dir": td.path().join("cache").to_string_lossy(),
    "token_file": td.path().join("no-such-token").to_string_lossy(),
  });
  let config = write_file(td.path(), "report.json", &cfg.to_string());

  cmd_bin("project-activity-report")
    .args(["--config", config.to_str().unwrap()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("reading token file"));

  assert_eq!(server.total_hits(), 0);
}

#[test]
fn unknown_config_key_is_rejected() {
  let td = tempdir();
  let config = write_file(td.path(), "report.json", r#"{ "project": ["acme"] }"#);

  cmd_bin("project-activity-report")
    .args(["--config", config.to_str().unwrap()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("parsing config"));
}

#[test]
fn api_error_status_aborts_the_run() {
  let server = MockGithub::start();
  server.route_status(
    "/repos/acme/widgets/commits?per_page=100",
    502,
    json!({"message": "Bad Gateway"}),
  );
  let td = tempdir();
  write_file(td.path(), "token", "t");
  let cfg = json!({
    "projects": ["acme/widgets"],
    "internal_orgs": [],
    "api_url": server.base_url(),
    "cache_dir": td.path().join("cache").to_string_lossy(),
    "token_file": td.path().join("token").to_string_lossy(),
  });
  let config = write_file(td.path(), "report.json", &cfg.to_string());

  cmd_bin("project-activity-report")
    .args(["--config", config.to_str().unwrap()])
    .assert()
    .failure()
    .stdout("")
    .stderr(predicate::str::contains("acme/widgets"))
    .stderr(predicate::str::contains("502"));

  assert!(!td.path().join("cache").join("repos_acme_widgets_commits").exists());
}

#[test]
fn malformed_project_flag_is_rejected() {
  cmd_bin("project-activity-report")
    .args(["--project", "a/b/c", "--token-file", "/nonexistent"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid project"));
}
