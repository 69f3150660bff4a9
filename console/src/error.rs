//! Console errors and exit codes

use loyalty_core::Error;
use std::fmt;

/// Failure of one console invocation
#[derive(Debug)]
pub enum CliError {
    /// Bad input the user can fix; exit code 2
    Validation(String),
    /// Backend, network or storage failure; exit code 3
    Failure(anyhow::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<Error> for CliError {
    fn from(error: Error) -> Self {
        match error {
            Error::MissingPartner => {
                Self::validation("no partner id set; run `loyalty-console partner set <id>` first")
            }
            Error::Validation(errors) => Self::validation(errors.to_string()),
            Error::NotFound(what) => Self::validation(what),
            other => Self::failure(other),
        }
    }
}
