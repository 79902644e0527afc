//! Failure classification shared by every HTTP provider.
//!
//! Maps HTTP statuses, transport errors and undecodable bodies onto the
//! domain's [`FailureKind`]s:
//!
//! | Condition                         | Kind          |
//! |-----------------------------------|---------------|
//! | 429                               | `RateLimited` |
//! | 401, 403, missing API key         | `AuthError`   |
//! | 408, 504, client-side timeout     | `Timeout`     |
//! | other 5xx, 529, connection errors | `Unavailable` |
//! | other 4xx, bad or empty body      | `Malformed`   |

use relay_domain::{FailureKind, ProviderFailure};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

const MAX_ERROR_DETAIL_CHARS: usize = 300;

/// Failure kind for a non-success HTTP status.
pub fn kind_for_status(status: StatusCode) -> FailureKind {
    match status.as_u16() {
        429 => FailureKind::RateLimited,
        401 | 403 => FailureKind::AuthError,
        408 | 504 => FailureKind::Timeout,
        500..=599 => FailureKind::Unavailable,
        _ => FailureKind::Malformed,
    }
}

/// Classify a non-success response.
pub fn classify_status(provider: &str, status: StatusCode, body: &str) -> ProviderFailure {
    ProviderFailure::new(
        kind_for_status(status),
        format!("{} returned HTTP {}: {}", provider, status.as_u16(), error_detail(body)),
    )
}

/// Classify an error raised by the HTTP client before a status was read.
pub fn classify_transport(provider: &str, err: &reqwest::Error) -> ProviderFailure {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_decode() {
        FailureKind::Malformed
    } else {
        FailureKind::Unavailable
    };
    ProviderFailure::new(kind, format!("{} request failed: {}", provider, err))
}

/// Pull the human-readable message out of an API error body.
///
/// Both supported APIs wrap errors as `{"error": {"message": ...}}`; anything
/// else is returned trimmed and shortened.
pub fn error_detail(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string());

    if message.is_empty() {
        return "(empty body)".to_string();
    }
    relay_domain::core::string::truncate(&message, MAX_ERROR_DETAIL_CHARS)
}

/// Send `request` and decode a JSON success body, classifying every failure.
pub async fn send_json<T: DeserializeOwned>(
    provider: &str,
    request: RequestBuilder,
) -> Result<T, ProviderFailure> {
    let response = request
        .send()
        .await
        .map_err(|e| classify_transport(provider, &e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| classify_transport(provider, &e))?;

    if !status.is_success() {
        debug!(provider, status = status.as_u16(), "Provider returned an error status");
        return Err(classify_status(provider, status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        ProviderFailure::malformed(format!("{} sent an unreadable response: {}", provider, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    #[test]
    fn test_status_table() {
        let cases = [
            (429, FailureKind::RateLimited),
            (401, FailureKind::AuthError),
            (403, FailureKind::AuthError),
            (408, FailureKind::Timeout),
            (504, FailureKind::Timeout),
            (500, FailureKind::Unavailable),
            (502, FailureKind::Unavailable),
            (503, FailureKind::Unavailable),
            (529, FailureKind::Unavailable),
            (400, FailureKind::Malformed),
            (404, FailureKind::Malformed),
            (422, FailureKind::Malformed),
        ];
        for (code, kind) in cases {
            assert_eq!(kind_for_status(status(code)), kind, "HTTP {code}");
        }
    }

    #[test]
    fn test_retriability_follows_status() {
        assert!(classify_status("GPT", status(429), "").retriable);
        assert!(classify_status("GPT", status(503), "").retriable);
        assert!(!classify_status("GPT", status(401), "").retriable);
        assert!(!classify_status("GPT", status(400), "").retriable);
    }

    #[test]
    fn test_error_detail_from_api_envelope() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(error_detail(body), "Overloaded");

        let failure = classify_status("Claude", status(529), body);
        assert_eq!(failure.kind, FailureKind::Unavailable);
        assert_eq!(failure.message, "Claude returned HTTP 529: Overloaded");
    }

    #[test]
    fn test_error_detail_plain_and_empty() {
        assert_eq!(error_detail("  bad gateway \n"), "bad gateway");
        assert_eq!(error_detail(""), "(empty body)");
        assert!(error_detail(&"x".repeat(1000)).chars().count() <= MAX_ERROR_DETAIL_CHARS);
    }
}
