//! Minimal HTTP/1.1 stub server standing in for the read-through proxy.
//!
//! Serves a single static HTML body and can be scripted to fail or stall
//! the first N requests, so tests can observe the retry loop from the
//! outside: every response carries `Connection: close`, forcing the
//! client to open one connection per attempt, and each handled request
//! increments a hit counter and records its request target.

// Each test binary compiles this module separately and uses a different
// subset of it.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct StubOptions {
    /// Respond with `failure_status` to this many leading requests before
    /// serving the body.
    pub failures_before_success: usize,
    /// Status code used for scripted failures.
    pub failure_status: u16,
    /// Stall this many leading requests for `delay` before responding
    /// (long enough for the client's per-attempt timeout to fire).
    pub stalled_requests: usize,
    pub delay: Duration,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            failures_before_success: 0,
            failure_status: 503,
            stalled_requests: 0,
            delay: Duration::ZERO,
        }
    }
}

pub struct StubServer {
    /// Proxy-style base URL ending in `?url=`; append the encoded target.
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Number of requests the server has parsed so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request heads seen so far, e.g. `GET /raw?url=… HTTP/1.1` plus headers.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a stub proxy in a background thread serving `body` as HTML.
/// The server runs until the test process exits.
pub fn start(body: &str) -> StubServer {
    start_with_options(body, StubOptions::default())
}

/// Like `start` but with scripted failures/stalls.
pub fn start_with_options(body: &str, opts: StubOptions) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body.to_string());
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));

    {
        let hits = Arc::clone(&hits);
        let requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let body = Arc::clone(&body);
                let hits = Arc::clone(&hits);
                let requests = Arc::clone(&requests);
                thread::spawn(move || handle(stream, &body, opts, &hits, &requests));
            }
        });
    }

    StubServer {
        base_url: format!("http://127.0.0.1:{}/raw?url=", port),
        hits,
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &str,
    opts: StubOptions,
    hits: &AtomicUsize,
    requests: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let head = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s.to_string(),
        Err(_) => return,
    };

    let index = hits.fetch_add(1, Ordering::SeqCst);
    requests.lock().unwrap().push(head);

    if index < opts.stalled_requests {
        // The client is expected to give up while we sleep; the write
        // below then fails harmlessly.
        thread::sleep(opts.delay);
    }

    if index < opts.failures_before_success {
        let response = format!(
            "HTTP/1.1 {} Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            opts.failure_status
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
