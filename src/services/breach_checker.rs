//! k-anonymity breach lookup against a compromised-password range API.
//!
//! The candidate password is hashed locally; only the first five hex
//! characters of the digest ever leave the process. The service returns a
//! newline-delimited batch of `SUFFIX:COUNT` records for that prefix, and
//! the match is decided here. SHA-1 is what the corpus protocol speaks;
//! it plays no integrity role.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ring::digest;

use crate::types::breach::BreachOutcome;
use crate::types::errors::BreachError;

/// Hex characters of the digest sent to the range API.
pub const HASH_PREFIX_LENGTH: usize = 5;

/// Client for the k-anonymity range API.
///
/// Checks may overlap: each call takes a ticket from a generation counter,
/// and a check that finishes after a newer one has started reports
/// [`BreachOutcome::Superseded`] instead of its stale result. Callers that
/// debounce input only need to submit candidates; ordering is handled here.
pub struct BreachChecker {
    http: reqwest::Client,
    base_url: String,
    generation: AtomicU64,
}

impl BreachChecker {
    /// Creates a checker against the given range API base URL
    /// (no trailing slash; the hash prefix is appended as a path segment).
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            generation: AtomicU64::new(0),
        }
    }

    /// Uppercase hex SHA-1 digest of the candidate password.
    pub fn hash_candidate(password: &str) -> String {
        let digest = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, password.as_bytes());
        hex::encode_upper(digest.as_ref())
    }

    /// Checks whether `password` appears in the breach corpus.
    ///
    /// # Errors
    /// Network, HTTP-status, and parse failures are surfaced as
    /// [`BreachError`]: an unknown outcome, never "safe".
    pub async fn check(&self, password: &str) -> Result<BreachOutcome, BreachError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let hash = Self::hash_candidate(password);
        let (prefix, suffix) = hash.split_at(HASH_PREFIX_LENGTH);
        let url = format!("{}/{}", self.base_url, prefix);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| BreachError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BreachError::Http(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BreachError::Network(e.to_string()))?;

        // A newer candidate was submitted while this request was in flight;
        // its result would overwrite fresher state.
        if self.generation.load(Ordering::SeqCst) != ticket {
            return Ok(BreachOutcome::Superseded);
        }

        scan_range_response(&body, suffix)
    }
}

/// Scans a `SUFFIX:COUNT` range response for the local hash suffix.
///
/// Accepts `\r\n` or `\n` separators and compares suffixes
/// case-insensitively.
fn scan_range_response(body: &str, suffix: &str) -> Result<BreachOutcome, BreachError> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (candidate, count) = line
            .split_once(':')
            .ok_or_else(|| BreachError::Parse(format!("malformed range record: {}", line)))?;
        if candidate.trim().eq_ignore_ascii_case(suffix) {
            let count = count
                .trim()
                .parse::<u64>()
                .map_err(|_| BreachError::Parse(format!("malformed breach count: {}", count)))?;
            return Ok(BreachOutcome::Leaked { count });
        }
    }
    Ok(BreachOutcome::Safe)
}
