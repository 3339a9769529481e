use opentelemetry_semantic_conventions::{attribute::OTEL_STATUS_CODE, trace::ERROR_TYPE};
use rocket::http::Status;
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::{Span, error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    /// The store could not be opened or queried.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classifies a failed insert, separating rejected rows from an
    /// unreachable store.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = match db_err.kind() {
                ErrorKind::ForeignKeyViolation => Some("foreign key"),
                ErrorKind::UniqueViolation => Some("unique"),
                ErrorKind::NotNullViolation => Some("not null"),
                ErrorKind::CheckViolation => Some("check"),
                _ => None,
            };

            if let Some(constraint) = constraint {
                return AppError::ConstraintViolation(format!(
                    "{} constraint failed: {}",
                    constraint,
                    db_err.message()
                ));
            }
        }

        AppError::Database(err)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Database(_) => "store_unavailable",
            AppError::ConstraintViolation(_) => "constraint_violation",
            AppError::NotFound(_) => "not_found_error",
            AppError::Validation(_) => "validation_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn log_and_record(&self, ctx: &str) {
        let current_span = Span::current();
        let is_valid_span = !current_span.is_none();

        let message = self.to_string();
        match self {
            AppError::Database(err) => {
                error!(error = %message, context = %ctx, db_error = %err, "Database error");
            }
            AppError::ConstraintViolation(msg) => {
                error!(message = %msg, context = %ctx, "Constraint violation");
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, context = %ctx, "Not found error");
            }
            AppError::Validation(msg) => {
                warn!(message = %msg, context = %ctx, "Validation error");
            }
            AppError::Internal(msg) => {
                error!(message = %msg, context = %ctx, "Internal server error");
            }
        }

        if is_valid_span {
            current_span.record("error", tracing::field::display(true));
            current_span.record(ERROR_TYPE, tracing::field::display(self.kind()));
            current_span.record("error.message", tracing::field::display(&message));

            match self {
                AppError::Database(_)
                | AppError::ConstraintViolation(_)
                | AppError::Internal(_) => {
                    current_span.record(OTEL_STATUS_CODE, tracing::field::display("ERROR"));
                }
                _ => {}
            }
        }
    }

    pub fn status_code(&self) -> Status {
        match self {
            AppError::Database(_) => Status::InternalServerError,
            AppError::ConstraintViolation(_) => Status::Conflict,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Validation(_) => Status::UnprocessableEntity,
            AppError::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn to_status_with_log(&self, context: &str) -> Status {
        self.log_and_record(context);
        self.status_code()
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        self.to_status_with_log(&format!("Request to {} {}", req.method(), req.uri()))
            .respond_to(req)
    }
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        err.to_status_with_log("Error conversion into Status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).status_code(),
            Status::InternalServerError
        );
        assert_eq!(
            AppError::ConstraintViolation("fk".to_string()).status_code(),
            Status::Conflict
        );
        assert_eq!(
            AppError::NotFound("assessment 9".to_string()).status_code(),
            Status::NotFound
        );
    }

    #[test]
    fn test_non_database_write_errors_stay_store_errors() {
        let err = AppError::from_write(sqlx::Error::PoolClosed);
        assert_eq!(err.kind(), "store_unavailable");
    }
}
