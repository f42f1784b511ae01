use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use validator::ValidationErrors;

pub const REQUEST_FAILED: &str = "Request failed";

#[derive(Debug)]
pub enum AppError {
    Transport(String),
    Decode(String),
    Status { status: u16, message: Option<String> },
    Validation(String),
    NotFound(String),
    Config(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    /// Message shown in the error banner after a failed create or update.
    pub fn submit_message(&self) -> String {
        match self {
            AppError::Status { message: Some(msg), .. } => msg.clone(),
            AppError::Status { message: None, .. } => REQUEST_FAILED.to_string(),
            AppError::Validation(msg) => msg.clone(),
            _ => "Failed to save employee".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Transport(msg) => write!(f, "Transport Error: {}", msg),
            AppError::Decode(msg) => write!(f, "Decode Error: {}", msg),
            AppError::Status { status, message: Some(msg) } => write!(f, "HTTP {}: {}", status, msg),
            AppError::Status { status, message: None } => write!(f, "HTTP {}", status),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Config(msg) => write!(f, "Config Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        let mut details = err
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let errors = errs
                    .iter()
                    .map(|e| e.message.as_deref().unwrap_or(&*e.code).to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", field, errors)
            })
            .collect::<Vec<_>>();
        details.sort();
        AppError::Validation(format!("Validation failed: {}", details.join("; ")))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Transport(_) | AppError::Decode(_) | AppError::Status { .. } => StatusCode::BAD_GATEWAY,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse { error: self.to_string() })
    }
}
