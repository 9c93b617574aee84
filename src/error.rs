//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Services and stores return it as a typed outcome; the HTTP boundary turns each
//! variant into a status code and a JSON body carrying a message and a timestamp.
//!
//! `AppError` implements `actix_web::error::ResponseError`, and provides `From`
//! implementations for `validator::ValidationErrors`, `jsonwebtoken::errors::Error`
//! and `bcrypt::BcryptError` so those can be propagated with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned to clients for any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// A single failed validation rule on a request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub property: String,
    pub message: String,
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// Malformed or otherwise unacceptable request (HTTP 400).
    BadRequest(String),
    /// Duplicate username or email at registration (HTTP 400).
    Conflict(String),
    /// The resource does not exist or is not owned by the caller (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500). The message is logged, never returned.
    InternalServerError(String),
    /// One or more request fields broke their validation rules (HTTP 400).
    ValidationError(Vec<FieldError>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::ValidationError(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "Validation Error: {}", messages.join(", "))
            }
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::Conflict(_) | AppError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let timestamp = Utc::now();
        let body = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg) => json!({
                "error": msg,
                "timestamp": timestamp
            }),
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                json!({
                    "error": INTERNAL_ERROR_MESSAGE,
                    "timestamp": timestamp
                })
            }
            AppError::ValidationError(errors) => json!({
                "error": "Validation failed",
                "errors": errors,
                "timestamp": timestamp
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Request bodies are camelCase on the wire, so properties are reported the same way.
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Flattens `validator::ValidationErrors` into per-field messages, ordered by property.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(property, field_errors)| {
                field_errors.iter().map(move |error| FieldError {
                    property: wire_name(property),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.property.cmp(&b.property));
        AppError::ValidationError(fields)
    }
}

/// Token processing failures mean the caller is unauthenticated.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
