use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

/// Codes `1..=99` are collaborator failures (retryable by the caller),
/// codes `100..` are validation errors raised by the caller's own input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    pub fn is_validation_error(&self) -> bool {
        self.code >= 100
    }

    pub fn is_collaborator_failure(&self) -> bool {
        (1..=99).contains(&self.code)
    }

    pub fn is_empty_needs_error(&self) -> bool {
        self.code == 101
    }

    pub fn is_unresolved_address_error(&self) -> bool {
        self.code == 102
    }

    pub fn is_driver_not_matched_error(&self) -> bool {
        self.code == 103
    }

    pub fn is_invalid_state_error(&self) -> bool {
        self.code == 104
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == 105
    }
}

pub fn empty_needs_error() -> Error {
    Error {
        code: 101,
        message: "empty needs".into(),
    }
}

pub fn unresolved_address_error() -> Error {
    Error {
        code: 102,
        message: "unresolved address".into(),
    }
}

pub fn driver_not_matched_error() -> Error {
    Error {
        code: 103,
        message: "driver not in match set".into(),
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 104,
        message: "invalid state".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 105,
        message: "invalid input".into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    tracing::error!(?err, "environment variable error");

    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!(?err, "database error");

    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::error!(?err, "reqwest error");

    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn announcer_error() -> Error {
    Error {
        code: 5,
        message: "announcer error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 6,
        message: "unexpected error".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_collaborator_codes_do_not_overlap() {
        let validation = [
            empty_needs_error(),
            unresolved_address_error(),
            driver_not_matched_error(),
            invalid_state_error(),
            invalid_input_error(),
        ];

        for err in validation.iter() {
            assert!(err.is_validation_error(), "{:?}", err);
            assert!(!err.is_collaborator_failure(), "{:?}", err);
        }

        let collaborator = [
            database_error("connection refused"),
            upstream_error(),
            announcer_error(),
            unexpected_error(),
        ];

        for err in collaborator.iter() {
            assert!(err.is_collaborator_failure(), "{:?}", err);
            assert!(!err.is_validation_error(), "{:?}", err);
        }
    }

    #[test]
    fn validation_errors_render_as_bad_request() {
        let response = empty_needs_error().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = upstream_error().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
