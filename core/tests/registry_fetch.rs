mod support;

use schain_core::error::CoreResult;
use schain_core::fetch::{HttpFetcher, RemoteFetcher};
use schain_core::registry::RegistryLookup;
use schain_core::report::{Severity, Verdict};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};
use support::{sellers_json, FakeFetcher};

fn closed_local_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Serves one HTTP response on a local port after `delay`, then closes.
fn serve_once(status_line: &str, body: &str, delay: Duration) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    thread::spawn(move || {
        let (mut stream, _) = match listener.accept() {
            Ok(conn) => conn,
            Err(_) => return,
        };
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        thread::sleep(delay);
        let _ = stream.write_all(response.as_bytes());
    });
    port
}

/// Sends every request to a plain-HTTP listener on localhost, keeping the path.
struct LocalRoute {
    inner: HttpFetcher,
    port: u16,
}

impl RemoteFetcher for LocalRoute {
    fn fetch_text(&self, url: &str) -> CoreResult<String> {
        let path = url::Url::parse(url).unwrap().path().to_string();
        self.inner
            .fetch_text(&format!("http://127.0.0.1:{}{}", self.port, path))
    }
}

fn local_route(port: u16, timeout: Duration) -> LocalRoute {
    LocalRoute {
        inner: HttpFetcher::new(timeout, "schain-test").unwrap(),
        port,
    }
}

#[test]
fn unreachable_registry_is_a_failed_verdict_not_a_fault() {
    let fetcher = local_route(closed_local_port(), Duration::from_secs(2));

    let outcome = RegistryLookup::new(&fetcher).lookup("a.com", "1");

    assert_eq!(outcome.verdict, Verdict::Failed);
    assert_eq!(outcome.name, "");
    assert_eq!(outcome.domain, "");
    assert_eq!(outcome.diagnostics.len(), 2);
    assert!(outcome.diagnostics[1]
        .message
        .starts_with("Error: Could not fetch sellers.json for ASI a.com: "));
}

#[test]
fn non_success_status_fails_even_with_a_matching_body() {
    let body = sellers_json(&[("1", "A Inc", "a.com")]);
    let port = serve_once("404 Not Found", &body, Duration::ZERO);
    let fetcher = local_route(port, Duration::from_secs(2));

    let outcome = RegistryLookup::new(&fetcher).lookup("a.com", "1");

    assert_eq!(outcome.verdict, Verdict::Failed);
    assert_eq!(outcome.name, "");
    let message = &outcome.diagnostics[1].message;
    assert!(
        message.starts_with("Error: Could not fetch sellers.json for ASI a.com: "),
        "unexpected diagnostic: {}",
        message
    );
    assert!(message.contains("404"), "unexpected diagnostic: {}", message);
}

#[test]
fn success_status_from_a_live_listener_passes() {
    let body = sellers_json(&[("1", "A Inc", "a.com")]);
    let port = serve_once("200 OK", &body, Duration::ZERO);
    let fetcher = local_route(port, Duration::from_secs(2));

    let outcome = RegistryLookup::new(&fetcher).lookup("a.com", "1");

    assert_eq!(outcome.verdict, Verdict::Passed);
    assert_eq!(outcome.name, "A Inc");
}

#[test]
fn slow_registry_is_cut_off_by_the_timeout() {
    let body = sellers_json(&[("1", "A Inc", "a.com")]);
    let port = serve_once("200 OK", &body, Duration::from_secs(5));
    let fetcher = local_route(port, Duration::from_millis(500));

    let started = Instant::now();
    let outcome = RegistryLookup::new(&fetcher).lookup("a.com", "1");
    let elapsed = started.elapsed();

    assert_eq!(outcome.verdict, Verdict::Failed);
    assert_eq!(outcome.diagnostics[1].severity, Severity::Error);
    assert!(
        elapsed < Duration::from_secs(3),
        "timeout not enforced, took {:?}",
        elapsed
    );
}

#[test]
fn http_fetcher_reports_transport_errors() {
    let fetcher = HttpFetcher::new(Duration::from_secs(2), "schain-test").unwrap();
    let url = format!("http://127.0.0.1:{}/app-ads.txt", closed_local_port());
    assert!(fetcher.fetch_text(&url).is_err());
}

#[test]
fn invalid_domain_fails_before_any_request() {
    let fetcher = FakeFetcher::new();
    let outcome = RegistryLookup::new(&fetcher).lookup("evil.com/x?", "1");

    assert_eq!(outcome.verdict, Verdict::Failed);
    assert!(fetcher.hits().is_empty());
    assert_eq!(outcome.diagnostics[1].severity, Severity::Error);
}

#[test]
fn first_matching_record_wins() {
    let fetcher = FakeFetcher::new().serve(
        "https://ssp.example/sellers.json",
        r#"{"sellers":[
            {"seller_id":"7","name":"First","domain":"first.example"},
            {"seller_id":"7","name":"Second","domain":"second.example"}
        ]}"#,
    );

    let outcome = RegistryLookup::new(&fetcher).lookup("ssp.example", "7");

    assert_eq!(outcome.verdict, Verdict::Passed);
    assert_eq!(outcome.name, "First");
    assert_eq!(outcome.domain, "first.example");
}

#[test]
fn unknown_seller_id_fails_with_diagnostic() {
    let fetcher = FakeFetcher::new().serve("https://ssp.example/sellers.json", r#"{"sellers":[]}"#);

    let outcome = RegistryLookup::new(&fetcher).lookup("ssp.example", "7");

    assert_eq!(outcome.verdict, Verdict::Failed);
    assert_eq!(
        outcome.diagnostics[1].message,
        "Failed: SID 7 not found in sellers.json for ASI ssp.example."
    );
}
