use reqwest::StatusCode;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can stop a single geocode or forecast lookup.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The query string for a request could not be encoded.
    #[error("failed to encode query parameters for {url}")]
    Query {
        url: String,
        #[source]
        source: serde_urlencoded::ser::Error,
    },

    /// Connection, DNS, timeout or body read failure.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The endpoint answered with something other than 200 OK.
    #[error("{url} responded with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The body was not JSON, or not the expected shape.
    #[error("unexpected response body from {url}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no location matches '{0}'")]
    NotFound(String),
}

impl FetchError {
    pub fn query(url: &str, source: serde_urlencoded::ser::Error) -> Self {
        Self::Query {
            url: url.to_string(),
            source,
        }
    }

    pub fn transport(url: &str, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    pub fn status(url: &str, status: StatusCode, body: &str) -> Self {
        Self::Status {
            url: url.to_string(),
            status,
            body: truncate_body(body),
        }
    }

    pub fn parse(url: &str, source: serde_json::Error) -> Self {
        Self::Parse {
            url: url.to_string(),
            source,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        let err = FetchError::status("http://x/search", StatusCode::BAD_REQUEST, "bad name");

        assert_eq!(
            err.to_string(),
            "http://x/search responded with status 400 Bad Request: bad name"
        );
    }

    #[test]
    fn long_body_is_truncated_on_char_boundary() {
        let body = "°".repeat(250);
        let FetchError::Status { body, .. } =
            FetchError::status("http://x", StatusCode::INTERNAL_SERVER_ERROR, &body)
        else {
            panic!("expected status error");
        };

        assert!(body.ends_with("..."));
        assert_eq!(body.trim_end_matches("...").chars().count(), 200);
    }

    #[test]
    fn transport_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = FetchError::transport("http://x", io);

        let source = std::error::Error::source(&err).expect("source must be kept");
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn query_error_names_endpoint_and_keeps_source() {
        let source = <serde_urlencoded::ser::Error as serde::ser::Error>::custom("bad pair");
        let err = FetchError::query("http://x/search", source);

        assert_eq!(
            err.to_string(),
            "failed to encode query parameters for http://x/search"
        );
        let source = std::error::Error::source(&err).expect("source must be kept");
        assert_eq!(source.to_string(), "bad pair");
    }
}
