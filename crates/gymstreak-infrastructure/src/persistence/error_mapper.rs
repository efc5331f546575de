use gymstreak_domain::shared::DomainError;
use tracing::error;

/// Translates storage errors into domain errors with a short context label
pub struct RepositoryErrorMapper;

impl RepositoryErrorMapper {
    pub fn map_sqlx_error(e: sqlx::Error, context: &str) -> DomainError {
        if Self::is_unique_violation(&e) {
            return DomainError::DataIntegrity(format!("{context}: {e}"));
        }

        error!(context, error = %e, "Repository operation failed");
        DomainError::Repository(format!("{context}: {e}"))
    }

    pub fn is_unique_violation(e: &sqlx::Error) -> bool {
        matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
    }
}
