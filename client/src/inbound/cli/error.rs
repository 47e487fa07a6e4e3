//! Errors surfaced by command handlers, with the wording shown to users.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::SessionStoreError;
use crate::domain::{Error, ErrorCode};

/// Failure of one command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A domain operation failed.
    #[error("{}", user_message(.0))]
    Domain(#[from] Error),
    /// The command needs a signed-in user.
    #[error("You must be logged in to do that.")]
    NotLoggedIn,
    /// The story list could not be fetched.
    #[error("Stories are unavailable right now. {}", user_message(.0))]
    StoriesUnavailable(Error),
    /// The session cache could not be read or written.
    #[error("Could not update the saved session: {0}")]
    Session(#[from] SessionStoreError),
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP client could not be constructed.
    #[error("Could not start the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// Output could not be written.
    #[error("Could not write output: {0}")]
    Io(#[from] std::io::Error),
}

fn user_message(err: &Error) -> String {
    match err.code() {
        ErrorCode::UsernameTaken => "Sorry, this username already exists!".to_owned(),
        ErrorCode::InvalidCredentials => "Username and password do not match!".to_owned(),
        ErrorCode::NotAuthenticated => "You must be logged in to do that.".to_owned(),
        ErrorCode::NotOwner => "You can only change stories you posted.".to_owned(),
        ErrorCode::Unauthorized => "The server rejected your session; log in again.".to_owned(),
        ErrorCode::NotFound => "That story or user no longer exists.".to_owned(),
        ErrorCode::Unavailable => "The server could not be reached; try again later.".to_owned(),
        _ => format!("The request failed: {}", err.message()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::username_taken("409"), "Sorry, this username already exists!")]
    #[case(
        Error::invalid_credentials("401"),
        "Username and password do not match!"
    )]
    #[case(Error::rejected("bad title"), "The request failed: bad title")]
    fn domain_errors_use_friendly_wording(#[case] err: Error, #[case] expected: &str) {
        assert_eq!(CliError::from(err).to_string(), expected);
    }
}
