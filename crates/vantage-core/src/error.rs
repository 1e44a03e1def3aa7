//! Error types for the Vantage client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API-response, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for Vantage operations.
///
/// This error type covers all possible failure modes in the client,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Failure responses from the backend API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (invalid base URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP transport error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the supplied identity/secret pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A previously valid token was rejected mid-session.
    #[error("session expired")]
    SessionExpired,

    /// An operation required a session but none exists.
    #[error("not authenticated")]
    NotAuthenticated,
}

/// A failure response from a backend endpoint.
///
/// Carries the HTTP status code and the `detail` field the backend
/// includes in its error bodies, when one could be decoded.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error detail from the response body (if present).
    pub detail: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }

    /// Check if this response rejected the request's credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },
}
