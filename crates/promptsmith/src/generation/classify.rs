//! Map failure signals from the generation API onto [`GenerationErrorKind`].
//!
//! Three sources are consulted, most specific first:
//!
//! 1. structured error reasons (`details[].reason`, e.g. `API_KEY_INVALID`),
//! 2. the structured API status (`error.status`, e.g. `RESOURCE_EXHAUSTED`),
//! 3. the HTTP status code.
//!
//! Transport failures (no response at all) are classified separately by
//! [`classify_transport`].

use super::GenerationErrorKind;

/// Classify from an error reason string such as `API_KEY_INVALID`.
pub fn classify_reason(reason: &str) -> Option<GenerationErrorKind> {
    match reason {
        "API_KEY_INVALID" | "API_KEY_EXPIRED" | "API_KEY_SERVICE_BLOCKED" => {
            Some(GenerationErrorKind::InvalidCredentials)
        }
        "RATE_LIMIT_EXCEEDED" | "RESOURCE_EXHAUSTED" => Some(GenerationErrorKind::RateLimited),
        _ => None,
    }
}

/// Classify from a structured API status such as `PERMISSION_DENIED`.
pub fn classify_api_status(status: &str) -> Option<GenerationErrorKind> {
    match status {
        "UNAUTHENTICATED" | "PERMISSION_DENIED" => Some(GenerationErrorKind::InvalidCredentials),
        "RESOURCE_EXHAUSTED" => Some(GenerationErrorKind::RateLimited),
        "UNAVAILABLE" | "INTERNAL" | "DEADLINE_EXCEEDED" => {
            Some(GenerationErrorKind::ServiceUnavailable)
        }
        _ => None,
    }
}

/// Classify from an HTTP status code.
pub fn classify_status(status: u16) -> Option<GenerationErrorKind> {
    match status {
        401 | 403 => Some(GenerationErrorKind::InvalidCredentials),
        429 => Some(GenerationErrorKind::RateLimited),
        500..=599 => Some(GenerationErrorKind::ServiceUnavailable),
        _ => None,
    }
}

/// Classify a failed API response from all available signals.
pub fn classify_failure(
    http_status: u16,
    api_status: Option<&str>,
    reasons: &[&str],
) -> GenerationErrorKind {
    reasons
        .iter()
        .find_map(|r| classify_reason(r))
        .or_else(|| api_status.and_then(classify_api_status))
        .or_else(|| classify_status(http_status))
        .unwrap_or(GenerationErrorKind::Unknown)
}

/// Classify a request that produced no HTTP response.
pub fn classify_transport(error: &reqwest::Error) -> GenerationErrorKind {
    if error.is_connect() || error.is_timeout() {
        GenerationErrorKind::NetworkUnreachable
    } else {
        GenerationErrorKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GenerationErrorKind::*;

    #[test]
    fn http_statuses() {
        assert_eq!(classify_status(401), Some(InvalidCredentials));
        assert_eq!(classify_status(403), Some(InvalidCredentials));
        assert_eq!(classify_status(429), Some(RateLimited));
        assert_eq!(classify_status(500), Some(ServiceUnavailable));
        assert_eq!(classify_status(503), Some(ServiceUnavailable));
        assert_eq!(classify_status(400), None);
        assert_eq!(classify_status(404), None);
    }

    #[test]
    fn invalid_key_reported_as_bad_request() {
        // The API answers a bad key with 400 INVALID_ARGUMENT plus a reason.
        assert_eq!(
            classify_failure(400, Some("INVALID_ARGUMENT"), &["API_KEY_INVALID"]),
            InvalidCredentials
        );
    }

    #[test]
    fn api_status_beats_http_status() {
        assert_eq!(classify_failure(400, Some("RESOURCE_EXHAUSTED"), &[]), RateLimited);
        assert_eq!(classify_failure(200, Some("UNAVAILABLE"), &[]), ServiceUnavailable);
        assert_eq!(classify_failure(400, Some("PERMISSION_DENIED"), &[]), InvalidCredentials);
    }

    #[test]
    fn falls_back_to_http_status_then_unknown() {
        assert_eq!(classify_failure(502, Some("SOMETHING_NEW"), &[]), ServiceUnavailable);
        assert_eq!(classify_failure(400, Some("INVALID_ARGUMENT"), &[]), Unknown);
        assert_eq!(classify_failure(418, None, &[]), Unknown);
    }

    #[tokio::test]
    async fn refused_connection_is_network_unreachable() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = reqwest::Client::new()
            .get(format!("http://127.0.0.1:{port}/"))
            .send()
            .await
            .unwrap_err();
        assert_eq!(classify_transport(&err), NetworkUnreachable);
    }

    #[tokio::test]
    async fn malformed_url_is_unknown() {
        let err = reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .unwrap_err();
        assert_eq!(classify_transport(&err), Unknown);
    }
}
