use thiserror::Error;

use crate::config::ConfigError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApplicationError {
    /// Stable machine-readable class for command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "invalid_input",
            Self::Configuration(_) => "config_validation",
            Self::Integration(_) => "integration",
            Self::NotFound(_) => "not_found",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Integration(_) => 3,
            Self::Domain(_) | Self::NotFound(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ConfigError;
    use crate::errors::{ApplicationError, DomainError};

    #[test]
    fn domain_error_maps_to_invalid_input_class() {
        let error = ApplicationError::from(DomainError::InvalidInput("empty catalog".to_owned()));

        assert_eq!(error.error_class(), "invalid_input");
        assert_eq!(error.exit_code(), 4);
        assert!(error.to_string().contains("empty catalog"));
    }

    #[test]
    fn configuration_error_uses_config_exit_code() {
        let error = ApplicationError::from(ConfigError::Validation("bad level".to_owned()));

        assert_eq!(error.error_class(), "config_validation");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn duplicate_id_message_names_kind_and_id() {
        let error = DomainError::DuplicateId { kind: "product", id: "p1".to_owned() };
        assert_eq!(error.to_string(), "duplicate product id `p1`");
    }
}
