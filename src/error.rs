use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Which identifier failed shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Zone,
    Record,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKind::Zone => write!(f, "zone id"),
            IdKind::Record => write!(f, "record id"),
        }
    }
}

/// One entry of the `errors` array in a Cloudflare response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

/// The structured error list Cloudflare attaches to failed responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrors(pub Vec<ApiError>);

impl fmt::Display for ApiErrors {
    /// One line per error, `  Code <code>: <message>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "  (no error details provided)");
        }
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  Code {}: {}", e.code, e.message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The pre-flight token verification was rejected by Cloudflare.
    #[error("API token rejected by Cloudflare:\n{errors}")]
    Auth { errors: ApiErrors },

    /// No zone suffix matched, or the matching zone held no record of
    /// that name.
    #[error("unable to find a zone and record for {name:?}")]
    NotFound { name: String },

    /// An identifier does not have the provider-assigned 32-hex shape.
    #[error("invalid {kind} {value:?}: expected 32 lowercase hex characters")]
    InvalidId { kind: IdKind, value: String },

    /// Only "A" records are managed; anything else is never mutated.
    #[error("record {name:?} has unsupported type {record_type:?}, expected \"A\"")]
    UnsupportedType { name: String, record_type: String },

    /// The provider envelope did not mark the response a success.
    #[error("Cloudflare request failed while {context}:\n{errors}")]
    Api { context: String, errors: ApiErrors },

    /// The envelope claimed success but carried a null result.
    #[error("Cloudflare marked the response a success while {context} but sent no result")]
    MissingResult { context: String },

    /// The echo endpoint answered with something that is not IPv4.
    #[error("public IP endpoint returned {body:?}, which is not an IPv4 address")]
    InvalidPublicIp { body: String },

    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_one_line_per_error() {
        let errors = ApiErrors(vec![
            ApiError {
                code: 6003,
                message: "Invalid request headers".to_string(),
            },
            ApiError {
                code: 9109,
                message: "Invalid access token".to_string(),
            },
        ]);

        assert_eq!(
            errors.to_string(),
            "  Code 6003: Invalid request headers\n  Code 9109: Invalid access token"
        );
    }

    #[test]
    fn test_api_errors_empty_list() {
        let errors = ApiErrors::default();
        assert_eq!(errors.to_string(), "  (no error details provided)");
    }

    #[test]
    fn test_id_kind_display() {
        assert_eq!(IdKind::Zone.to_string(), "zone id");
        assert_eq!(IdKind::Record.to_string(), "record id");
    }
}
