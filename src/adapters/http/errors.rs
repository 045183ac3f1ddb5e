use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::invoice::InvoiceError;
use crate::domain::rates::RateError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Request body failed field validation (400 Bad Request). One
  /// `path: message` entry per failing field.
  InvalidFields(Vec<String>),

  /// Rates or invoice backend failed (502 Bad Gateway)
  Upstream(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::InvalidFields(fields) => write!(f, "Validation error: {}", fields.join(", ")),
      ApiError::Upstream(msg) => write!(f, "Upstream error: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::InvalidFields(_) => StatusCode::BAD_REQUEST,
      ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message, details) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone(), None),
      ApiError::InvalidFields(fields) => (
        "validation_error",
        fields.join(", "),
        Some(serde_json::json!(fields)),
      ),
      ApiError::Upstream(msg) => {
        tracing::warn!("Upstream error: {}", msg);
        ("upstream_error", msg.clone(), None)
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
          None,
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<RateError> for ApiError {
  fn from(error: RateError) -> Self {
    match error {
      RateError::UnknownSource(_) | RateError::UnknownDirection(_) => {
        ApiError::Validation(error.to_string())
      }
      RateError::Unavailable(_)
      | RateError::MalformedPayload(_)
      | RateError::DuplicateCurrency { .. } => ApiError::Upstream(error.to_string()),
    }
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(e) => ApiError::Validation(e.to_string()),
      InvoiceError::NoLineItems | InvoiceError::NoCustomers => {
        ApiError::Validation(error.to_string())
      }
      InvoiceError::Gateway(msg) => ApiError::Upstream(msg),
      InvoiceError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert validation errors from validator crate.
///
/// Nested form sections are flattened into dotted paths such as
/// `items[1].quantity`.
impl From<ValidationErrors> for ApiError {
  fn from(errors: ValidationErrors) -> Self {
    let mut messages = Vec::new();
    collect_messages(&errors, "", &mut messages);
    messages.sort();

    ApiError::InvalidFields(messages)
  }
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
  for (field, kind) in errors.errors() {
    let path = if prefix.is_empty() {
      field.to_string()
    } else {
      format!("{}.{}", prefix, field)
    };

    match kind {
      ValidationErrorsKind::Field(field_errors) => {
        out.extend(field_errors.iter().map(|error| {
          let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "is invalid".to_string());
          format!("{}: {}", path, message)
        }));
      }
      ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
      ValidationErrorsKind::List(items) => {
        for (index, nested) in items {
          collect_messages(nested, &format!("{}[{}]", path, index), out);
        }
      }
    }
  }
}
