//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```rust,no_run
//! use test_support::{init_tracing, MockGithub};
//!
//! init_tracing();
//! let server = MockGithub::start();
//! server.route("/orgs/acme/members?per_page=100", serde_json::json!([{"login": "alice"}]));
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use std::{env, thread};

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(&path, contents).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    path
}

/// Set multiple environment variables for the duration of the returned guard.
pub fn with_env(vars: &[(&str, &str)]) -> EnvGuard {
    EnvGuard::set_many(vars)
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// Guard for temporarily setting environment variables.
pub struct EnvGuard {
    prev: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn set_many(kv: &[(&str, &str)]) -> Self {
        let mut prev = Vec::with_capacity(kv.len());
        for (k, v) in kv {
            let k_owned = k.to_string();
            prev.push((k_owned.clone(), env::var(k).ok()));
            env::set_var(k, v);
        }
        Self { prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, old) in self.prev.drain(..) {
            match old {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}

// --- Mock GitHub REST server ---

#[derive(Clone)]
struct Canned {
    status: u16,
    body: String,
    link: Option<String>,
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Canned>,
    hits: HashMap<String, usize>,
    headers: HashMap<String, HashMap<String, String>>,
}

/// Blocking HTTP/1.1 server on 127.0.0.1 serving canned JSON by exact request target
/// (path plus query, e.g. `/repos/o/r/pulls?state=all&per_page=100`).
///
/// Unknown targets answer 404. Every request is counted, and the headers of the most
/// recent request per target are kept for assertions.
pub struct MockGithub {
    addr: SocketAddr,
    state: Arc<Mutex<State>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MockGithub {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");
        let state = Arc::new(Mutex::new(State::default()));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let state = Arc::clone(&state);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                for stream in listener.incoming() {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    if let Ok(stream) = stream {
                        handle_client(stream, &state);
                    }
                }
            })
        };

        Self {
            addr,
            state,
            stop,
            handle: Some(handle),
        }
    }

    /// `http://127.0.0.1:<port>/`
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Absolute URL for a target relative to the server root.
    pub fn url(&self, rel: &str) -> String {
        format!("{}{}", self.base_url(), rel.trim_start_matches('/'))
    }

    pub fn route(&self, target: &str, body: Value) {
        self.insert(target, 200, body, None);
    }

    pub fn route_with_link(&self, target: &str, body: Value, link: &str) {
        self.insert(target, 200, body, Some(link.to_string()));
    }

    pub fn route_status(&self, target: &str, status: u16, body: Value) {
        self.insert(target, status, body, None);
    }

    /// Number of requests received for `target`.
    pub fn hits(&self, target: &str) -> usize {
        self.state.lock().unwrap().hits.get(target).copied().unwrap_or(0)
    }

    /// Requests received across all targets.
    pub fn total_hits(&self) -> usize {
        self.state.lock().unwrap().hits.values().sum()
    }

    /// Header (name matched case-insensitively) of the latest request for `target`.
    pub fn last_header(&self, target: &str, name: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .headers
            .get(target)
            .and_then(|h| h.get(&name.to_ascii_lowercase()))
            .cloned()
    }

    fn insert(&self, target: &str, status: u16, body: Value, link: Option<String>) {
        let canned = Canned {
            status,
            body: body.to_string(),
            link,
        };
        self.state.lock().unwrap().routes.insert(target.to_string(), canned);
    }
}

impl Drop for MockGithub {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        // wake the accept loop so it observes the flag
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn read_request_head(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    if buf.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(&buf).to_string())
}

fn handle_client(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let Some(head) = read_request_head(&mut stream) else {
        return;
    };

    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let target = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();

    let headers: HashMap<String, String> = lines
        .take_while(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let canned = {
        let mut st = state.lock().unwrap();
        *st.hits.entry(target.clone()).or_insert(0) += 1;
        st.headers.insert(target.clone(), headers);
        st.routes.get(&target).cloned()
    };

    let canned = canned.unwrap_or_else(|| Canned {
        status: 404,
        body: r#"{"message":"Not Found"}"#.to_string(),
        link: None,
    });
    debug!(path = %target, status = canned.status, "mock github");

    let reason = match canned.status {
        200 => "OK",
        404 => "Not Found",
        _ => "Status",
    };
    let mut resp = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        canned.status,
        reason,
        canned.body.len()
    );
    if let Some(link) = &canned.link {
        resp.push_str(&format!("Link: {}\r\n", link));
    }
    resp.push_str("\r\n");
    resp.push_str(&canned.body);

    let _ = stream.write_all(resp.as_bytes());
    let _ = stream.flush();
}
