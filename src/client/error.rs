use thiserror::Error;

use crate::error::AppError;
use crate::pricing::validation::ValidationIssue;

const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("validation failed ({} issues)", .0.len())]
    Validation(Vec<ValidationIssue>),

    #[error("backend returned {status}")]
    Backend { status: u16, message: Option<String> },

    #[error("not logged in or session expired")]
    Unauthenticated,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Text for a transient notification shown to the admin.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(issues) => match issues.first() {
                Some(first) if issues.len() == 1 => first.to_string(),
                Some(first) => format!("{first} (and {} more)", issues.len() - 1),
                None => FALLBACK_MESSAGE.to_string(),
            },
            ClientError::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Backend { .. } => FALLBACK_MESSAGE.to_string(),
            ClientError::Unauthenticated => "Please log in again.".to_string(),
            ClientError::Transport(_) => "Could not reach the pricing service.".to_string(),
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(issues) => ClientError::Validation(issues),
            AppError::Unauthorized => ClientError::Unauthenticated,
            other => ClientError::Backend {
                status: other.status_code().as_u16(),
                message: Some(other.message()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins_over_fallback() {
        let err = ClientError::Backend {
            status: 400,
            message: Some("radiusKm must be between 1 and 50".to_string()),
        };
        assert_eq!(err.user_message(), "radiusKm must be between 1 and 50");

        let err = ClientError::Backend {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn validation_message_counts_extra_issues() {
        let err = ClientError::Validation(vec![
            ValidationIssue::new("distanceTiers[1].type", "only the first tier may be fixed"),
            ValidationIssue::new("minimumHours", "must be at least 1"),
        ]);
        assert_eq!(
            err.user_message(),
            "distanceTiers[1].type: only the first tier may be fixed (and 1 more)"
        );
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let err: ClientError = AppError::NotFound("location x not found".to_string()).into();
        assert!(matches!(err, ClientError::Backend { status: 404, .. }));
    }
}
