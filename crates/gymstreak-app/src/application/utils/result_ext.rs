use gymstreak_domain::shared::DomainError;

/// Shorthand for turning foreign errors into domain errors
pub trait ResultExt<T, E> {
    /// Map any displayable error to `DomainError::Infrastructure`
    fn to_infra_err(self) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }
}
