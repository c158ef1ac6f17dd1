//! Handler responses.

use serde::Serialize;
use serde_json::Value;

use super::ApiError;

/// Response status understood by the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// 200
    Ok,
    /// 201
    Created,
    /// 204
    NoContent,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 500
    InternalServerError,
    /// 503
    ServiceUnavailable,
}

impl Status {
    /// Returns the numeric HTTP status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::Created | Self::NoContent)
    }
}

/// Status plus optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Response status.
    pub status: Status,
    /// JSON body, absent for 204.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Serializes `payload` as the body.
    ///
    /// # Errors
    ///
    /// Returns an internal [`ApiError`] when serialization fails.
    pub fn json(status: Status, payload: &impl Serialize) -> Result<Self, ApiError> {
        let body = serde_json::to_value(payload).map_err(|err| ApiError::internal(&err))?;
        Ok(Self {
            status,
            body: Some(body),
        })
    }

    /// Returns an empty 204 response.
    #[must_use]
    pub const fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            body: None,
        }
    }

    /// Returns the `message` field of the body, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref()?.get("message")?.as_str()
    }
}
