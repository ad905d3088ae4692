// tests/probe_engine_test.rs

use securecheck::core::config::ScanConfig;
use securecheck::core::models::{ScanProfile, Severity};
use securecheck::core::scanner::headers_scanner::run_headers_scan;
use securecheck::core::scanner::scheme_scanner::run_scheme_scan;
use securecheck::core::scanner::ssl_scanner::run_ssl_scan;
use securecheck::core::scanner::perform_scan;
use securecheck::core::target::resolve;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn bare_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_headers_probe_reports_missing_headers_in_table_order() {
    let mock_server = bare_server().await;
    let target = resolve(&mock_server.uri()).unwrap();

    let findings = run_headers_scan(&target, &ScanConfig::default()).await;

    let titles: Vec<&str> = findings.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Missing HSTS header",
            "Missing X-Content-Type-Options header",
            "Missing X-Frame-Options header",
            "Missing Content-Security-Policy header",
            "Missing X-XSS-Protection header",
        ]
    );
    let severities: Vec<Severity> = findings.iter().map(|f| f.severity).collect();
    assert_eq!(
        severities,
        [Severity::Medium, Severity::Low, Severity::Medium, Severity::Medium, Severity::Low]
    );
}

#[tokio::test]
async fn test_headers_probe_on_hardened_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Strict-Transport-Security", "max-age=31536000")
                .insert_header("X-Content-Type-Options", "nosniff")
                .insert_header("X-Frame-Options", "DENY")
                .insert_header("Content-Security-Policy", "default-src 'self'")
                .insert_header("X-XSS-Protection", "1; mode=block")
                .insert_header("Set-Cookie", "sid=abc; Secure; HttpOnly"),
        )
        .mount(&mock_server)
        .await;
    let target = resolve(&mock_server.uri()).unwrap();

    let findings = run_headers_scan(&target, &ScanConfig::default()).await;

    assert_eq!(findings.len(), 5);
    assert!(findings.iter().all(|f| f.severity == Severity::Info));
}

#[tokio::test]
async fn test_headers_probe_flags_server_and_cookies() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Server", "Apache/2.4.41 (Ubuntu)")
                .insert_header("Set-Cookie", "session=1; Path=/"),
        )
        .mount(&mock_server)
        .await;
    let target = resolve(&mock_server.uri()).unwrap();

    let findings = run_headers_scan(&target, &ScanConfig::default()).await;

    assert_eq!(findings.len(), 8);
    assert_eq!(findings[5].title, "Server information disclosure");
    assert!(findings[5].description.contains("Apache/2.4.41 (Ubuntu)"));
    assert_eq!(findings[6].title, "Cookie without Secure flag");
    assert_eq!(findings[7].title, "Cookie without HttpOnly flag");
    assert!(findings[5..].iter().skip(1).all(|f| f.severity == Severity::Medium));
}

#[tokio::test]
async fn test_headers_probe_follows_redirects() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/new", mock_server.uri())),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Frame-Options", "SAMEORIGIN"))
        .mount(&mock_server)
        .await;
    let target = resolve(&format!("{}/old", mock_server.uri())).unwrap();

    let findings = run_headers_scan(&target, &ScanConfig::default()).await;

    assert_eq!(findings[2].title, "X-Frame-Options header present");
    assert_eq!(findings[2].severity, Severity::Info);
}

#[tokio::test]
async fn test_full_scan_on_http_target_concatenates_probes() {
    let mock_server = bare_server().await;
    let config = ScanConfig::default();
    let target = resolve(&mock_server.uri()).unwrap();

    let findings = perform_scan(&mock_server.uri(), ScanProfile::Full, &config).await.unwrap();

    let mut expected = run_scheme_scan(&target);
    expected.extend(run_headers_scan(&target, &config).await);
    expected.extend(run_ssl_scan(&target, &config).await);
    assert_eq!(findings, expected);

    // Scheme contributes one high finding, TLS contributes nothing.
    assert_eq!(findings[0].severity, Severity::High);
    assert_eq!(findings.len(), 6);
    assert_eq!(
        findings.iter().filter(|f| f.severity == Severity::High).count(),
        1
    );
}

#[tokio::test]
async fn test_repeated_full_scans_are_stable() {
    let mock_server = bare_server().await;
    let config = ScanConfig::default();

    let first = perform_scan(&mock_server.uri(), ScanProfile::Full, &config).await.unwrap();
    let second = perform_scan(&mock_server.uri(), ScanProfile::Full, &config).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_headers_profile_runs_only_the_header_probe() {
    let mock_server = bare_server().await;

    let findings = perform_scan(&mock_server.uri(), ScanProfile::Headers, &ScanConfig::default())
        .await
        .unwrap();

    assert_eq!(findings.len(), 5);
    assert!(findings.iter().all(|f| f.title != "Site not using HTTPS"));
}
