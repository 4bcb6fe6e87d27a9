//! Unit tests for the breach checker.
//!
//! The range API is mocked with wiremock; the tests pin the k-anonymity
//! contract (only the 5-character prefix leaves the client) and the
//! supersession of stale in-flight checks.

use std::sync::Arc;
use std::time::Duration;

use passvault::services::breach_checker::BreachChecker;
use passvault::types::breach::BreachOutcome;
use passvault::types::errors::BreachError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// SHA-1("password"), the classic corpus example.
const PASSWORD_HASH: &str = "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8";
const PASSWORD_PREFIX: &str = "5BAA6";
const PASSWORD_SUFFIX: &str = "1E4C9B93F3F0682250B6CF8331B7EE68FD8";

// SHA-1("abc"), the RFC 3174 test vector.
const ABC_HASH: &str = "A9993E364706816ABA3E25717850C26C9CD0D89D";

// ─── Hashing ───

#[test]
fn test_hash_is_uppercase_hex_sha1() {
    assert_eq!(BreachChecker::hash_candidate("password"), PASSWORD_HASH);
    assert_eq!(BreachChecker::hash_candidate("abc"), ABC_HASH);
}

#[test]
fn test_hash_splits_into_5_and_35() {
    let hash = BreachChecker::hash_candidate("password");
    let (prefix, suffix) = hash.split_at(5);
    assert_eq!(prefix, PASSWORD_PREFIX);
    assert_eq!(suffix, PASSWORD_SUFFIX);
    assert_eq!(suffix.len(), 35);
}

// ─── Protocol ───

#[tokio::test]
async fn test_leaked_candidate_reports_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", PASSWORD_PREFIX)))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "0018A45C4D1DEF81644B54AB7F969B88D65:3\r\n{}:3730471\r\n00D4F6E8FA6EECAD2A3AA415EEC418D38EC:2",
            PASSWORD_SUFFIX
        )))
        .mount(&server)
        .await;

    let checker = BreachChecker::new(&server.uri());
    let outcome = checker.check("password").await.unwrap();
    assert_eq!(outcome, BreachOutcome::Leaked { count: 3730471 });
}

#[tokio::test]
async fn test_absent_suffix_reports_safe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", PASSWORD_PREFIX)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("0018A45C4D1DEF81644B54AB7F969B88D65:3\r\n"),
        )
        .mount(&server)
        .await;

    let checker = BreachChecker::new(&server.uri());
    assert_eq!(checker.check("password").await.unwrap(), BreachOutcome::Safe);
}

#[tokio::test]
async fn test_suffix_match_is_case_insensitive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", PASSWORD_PREFIX)))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "{}:41",
            PASSWORD_SUFFIX.to_lowercase()
        )))
        .mount(&server)
        .await;

    let checker = BreachChecker::new(&server.uri());
    assert_eq!(
        checker.check("password").await.unwrap(),
        BreachOutcome::Leaked { count: 41 }
    );
}

#[tokio::test]
async fn test_only_the_prefix_leaves_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let checker = BreachChecker::new(&server.uri());
    checker.check("password").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let url = requests[0].url.as_str();
    assert!(url.ends_with(&format!("/{}", PASSWORD_PREFIX)), "url: {url}");
    assert!(!url.contains(PASSWORD_SUFFIX));
    assert!(!url.contains("password"));
}

#[tokio::test]
async fn test_bare_newlines_are_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", PASSWORD_PREFIX)))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "0018A45C4D1DEF81644B54AB7F969B88D65:3\n{}:7\n",
            PASSWORD_SUFFIX
        )))
        .mount(&server)
        .await;

    let checker = BreachChecker::new(&server.uri());
    assert_eq!(
        checker.check("password").await.unwrap(),
        BreachOutcome::Leaked { count: 7 }
    );
}

// ─── Failure semantics ───

#[tokio::test]
async fn test_http_error_is_never_safe_or_leaked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let checker = BreachChecker::new(&server.uri());
    let err = checker.check("password").await.unwrap_err();
    assert!(matches!(err, BreachError::Http(500)));
}

#[tokio::test]
async fn test_unreachable_service_is_a_network_error() {
    // Nothing listens on this port.
    let checker = BreachChecker::new("http://127.0.0.1:1");
    let err = checker.check("password").await.unwrap_err();
    assert!(matches!(err, BreachError::Network(_)));
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not a range response"))
        .mount(&server)
        .await;

    let checker = BreachChecker::new(&server.uri());
    let err = checker.check("password").await.unwrap_err();
    assert!(matches!(err, BreachError::Parse(_)));
}

// ─── Supersession ───

#[tokio::test]
async fn test_stale_check_is_superseded_by_newer_candidate() {
    let server = MockServer::start().await;

    // The first candidate's range answers slowly and would report Leaked.
    Mock::given(method("GET"))
        .and(path(format!("/{}", PASSWORD_PREFIX)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("{}:3730471", PASSWORD_SUFFIX))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    // The newer candidate's range answers immediately.
    Mock::given(method("GET"))
        .and(path(format!("/{}", &ABC_HASH[..5])))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let checker = Arc::new(BreachChecker::new(&server.uri()));

    let slow = {
        let checker = checker.clone();
        tokio::spawn(async move { checker.check("password").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    let fresh = checker.check("abc").await.unwrap();
    let stale = slow.await.unwrap().unwrap();

    assert_eq!(fresh, BreachOutcome::Safe);
    // The slow check finished after a newer candidate: its Leaked result
    // must not surface.
    assert_eq!(stale, BreachOutcome::Superseded);
}
