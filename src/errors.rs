use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Validation(String),
    InvalidEmail,
    TooManySuggestions,
    InvalidVote,
    NotFound(&'static str),
    FeedbackNotFound,
    SuggestionNotFound,
    ActiveSuggestionNotFound,
    AlreadyVoted(String),
    DuplicateVote,
    Unauthorized,
    RateLimited,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::InvalidEmail => write!(f, "Invalid email format"),
            AppError::TooManySuggestions => write!(f, "Maximum 4 suggestions allowed"),
            AppError::InvalidVote => write!(f, "Invalid vote. Must be \"agree\" or \"disagree\""),
            AppError::NotFound(what) => write!(f, "{what} not found"),
            AppError::FeedbackNotFound => write!(f, "Original feedback not found"),
            AppError::SuggestionNotFound => write!(f, "Suggestion not found in feedback"),
            AppError::ActiveSuggestionNotFound => write!(f, "Active suggestion not found"),
            AppError::AlreadyVoted(_) => write!(f, "You have already voted on this suggestion"),
            AppError::DuplicateVote => write!(f, "Duplicate vote detected"),
            AppError::Unauthorized => write!(f, "Admin authorization required"),
            AppError::RateLimited => {
                write!(f, "Too many requests. Please try again in 15 minutes.")
            }
        }
    }
}

impl AppError {
    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Db(_) => "SERVER_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidEmail => "INVALID_EMAIL",
            AppError::TooManySuggestions => "TOO_MANY_SUGGESTIONS",
            AppError::InvalidVote => "INVALID_VOTE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::FeedbackNotFound => "FEEDBACK_NOT_FOUND",
            AppError::SuggestionNotFound | AppError::ActiveSuggestionNotFound => {
                "SUGGESTION_NOT_FOUND"
            }
            AppError::AlreadyVoted(_) => "ALREADY_VOTED",
            AppError::DuplicateVote => "DUPLICATE_VOTE",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::RateLimited => "RATE_LIMIT_EXCEEDED",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidEmail
            | AppError::TooManySuggestions
            | AppError::InvalidVote => StatusCode::BAD_REQUEST,
            AppError::NotFound(_)
            | AppError::FeedbackNotFound
            | AppError::SuggestionNotFound
            | AppError::ActiveSuggestionNotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyVoted(_) | AppError::DuplicateVote => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "error": self.to_string(),
            "code": self.code(),
        });

        match self {
            AppError::Db(_) => {
                log::error!("{self}");
                body["error"] = json!("Internal server error");
            }
            AppError::AlreadyVoted(existing) => {
                body["existingVote"] = json!(existing);
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}
