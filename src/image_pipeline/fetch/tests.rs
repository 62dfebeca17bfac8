use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use crate::image_pipeline::common::error::PipelineError;
use crate::image_pipeline::fetch::{FetchConfig, FileFetcher, HttpFetcher, ImageFetcher, SchemeFetcher};

/// Serves one canned HTTP response on a loopback port and returns its base URL.
fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }
        let header = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line,
            body.len()
        );
        stream.write_all(header.as_bytes()).unwrap();
        stream.write_all(body).unwrap();
    });

    format!("http://{}", addr)
}

fn test_config() -> FetchConfig {
    FetchConfig::builder().timeout(Duration::from_secs(5)).build()
}

#[test]
fn test_config_builder() {
    let config = FetchConfig::builder()
        .timeout(Duration::from_secs(3))
        .user_agent("visual-regression/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(3));
    assert_eq!(config.user_agent, "visual-regression/1.0");
}

#[test]
fn test_config_default_timeout() {
    let config = FetchConfig::builder().build();
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_file_fetcher_reads_plain_path_and_file_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.bin");
    std::fs::write(&path, b"\x01\x02\x03").unwrap();

    let plain = FileFetcher.fetch(path.to_str().unwrap()).unwrap();
    assert_eq!(plain, vec![1, 2, 3]);

    let url = format!("file://{}", path.display());
    let via_url = FileFetcher.fetch(&url).unwrap();
    assert_eq!(via_url, plain);
}

#[test]
fn test_file_fetcher_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.png");

    let result = FileFetcher.fetch(missing.to_str().unwrap());
    assert!(matches!(result, Err(PipelineError::FetchError { .. })));
}

#[test]
fn test_http_fetcher_returns_body() {
    let base = serve_once("200 OK", b"png-bytes");
    let fetcher = HttpFetcher::new(&test_config()).unwrap();

    let body = fetcher.fetch(&format!("{}/base.png", base)).unwrap();
    assert_eq!(body, b"png-bytes".to_vec());
}

#[test]
fn test_http_fetcher_rejects_non_ok_status() {
    let base = serve_once("404 Not Found", b"");
    let fetcher = HttpFetcher::new(&test_config()).unwrap();

    let result = fetcher.fetch(&format!("{}/missing.png", base));
    assert!(matches!(
        result,
        Err(PipelineError::HttpStatus { status: 404, .. })
    ));
}

#[test]
fn test_http_fetcher_connection_failure() {
    // Bind then drop to get a port that nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let fetcher = HttpFetcher::new(&test_config()).unwrap();

    let result = fetcher.fetch(&format!("http://127.0.0.1:{}/x.png", port));
    assert!(matches!(result, Err(PipelineError::FetchError { .. })));
}

#[test]
fn test_scheme_detection() {
    assert!(SchemeFetcher::is_remote("http://example.com/a.png"));
    assert!(SchemeFetcher::is_remote("HTTPS://example.com/a.png"));
    assert!(!SchemeFetcher::is_remote("file:///tmp/a.png"));
    assert!(!SchemeFetcher::is_remote("/tmp/a.png"));
    assert!(!SchemeFetcher::is_remote("http"));
}

#[test]
fn test_scheme_fetcher_routes_local_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.png");
    std::fs::write(&path, b"local").unwrap();

    let fetcher = SchemeFetcher::new(&test_config()).unwrap();
    assert_eq!(fetcher.fetch(path.to_str().unwrap()).unwrap(), b"local".to_vec());
}
