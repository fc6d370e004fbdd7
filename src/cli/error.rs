//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("no recursion tree: {0}")]
    TreeUnavailable(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::TreeUnavailable(_) => crate::exitcode::DATAERR,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Serialize(_) => crate::exitcode::SOFTWARE,
                InfraError::Application(app) => match app {
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::EmptyInput(_) => crate::exitcode::USAGE,
                    ApplicationError::InputNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                    ApplicationError::Domain(DomainError::InvalidMode(_)) => {
                        crate::exitcode::USAGE
                    }
                    ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn given_errors_when_mapping_exit_codes_then_follow_sysexits() {
        let missing: CliError = ApplicationError::InputNotFound(PathBuf::from("x.md")).into();
        let config: CliError = ApplicationError::Config {
            message: "bad".into(),
        }
        .into();
        let no_answer: CliError = ApplicationError::Domain(DomainError::NoAnswer).into();

        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);
        assert_eq!(no_answer.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(
            CliError::TreeUnavailable("absent".into()).exit_code(),
            crate::exitcode::DATAERR
        );
    }
}
