//! Error types for the student client.
//!
//! # Design
//! `ApiError` covers everything that can go wrong once a request leaves the
//! controller. `ValidationError` never reaches the network: it is produced
//! by `StudentDraft::validate` before any request is built.
//! `ControllerError` is what the controller methods return after the error
//! has already been shown on the surface.

/// Errors produced while executing a request or interpreting its response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a status outside 200..300.
    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    /// The response body was not the JSON shape we expected.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request payload could not be encoded as JSON.
    #[error("could not encode request body: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A form draft that cannot be submitted. `fields` names every offending
/// field in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "please fill in every field (name, lastname, age, grade) and make sure the age is a valid number; invalid: {}",
    .fields.join(", ")
)]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

/// Failure of a controller operation.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ControllerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ControllerError::Validation(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ControllerError::Api(e) => e.status(),
            ControllerError::Validation(_) => None,
        }
    }
}
