//! Credential payloads submitted to the remote API.
//!
//! The remote API is the only validator; these types carry the values through
//! the domain and keep passwords out of logs and memory dumps.

use std::fmt;

use zeroize::Zeroizing;

use super::Username;

/// Username and password submitted on login.
///
/// # Examples
/// ```
/// use hack_or_snooze::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("ada", "hunter2");
/// assert_eq!(creds.username().as_ref(), "ada");
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Bundle raw inputs.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Username::new(username),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password as provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration payload: credentials plus a display name.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    credentials: LoginCredentials,
    name: String,
}

impl NewAccount {
    /// Bundle raw inputs.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            credentials: LoginCredentials::new(username, password),
            name: name.into(),
        }
    }

    /// Account name.
    pub fn username(&self) -> &Username {
        self.credentials.username()
    }

    /// Password as provided by the caller.
    pub fn password(&self) -> &str {
        self.credentials.password()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("credentials", &self.credentials)
            .field("name", &self.name)
            .finish()
    }
}

/// Profile patch: new display name and new password.
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: String,
    password: Zeroizing<String>,
}

impl ProfileUpdate {
    /// Bundle raw inputs.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Requested display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Requested password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada", "pw")]
    #[case("  spaced  ", " keep whitespace ")]
    fn credentials_keep_inputs_verbatim(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::new(username, password);
        assert_eq!(creds.username().as_ref(), username);
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn debug_output_never_contains_passwords() {
        let account = NewAccount::new("ada", "s3cret-signup", "Ada");
        let profile = ProfileUpdate::new("Ada L", "s3cret-profile");
        assert!(!format!("{account:?}").contains("s3cret-signup"));
        assert!(!format!("{profile:?}").contains("s3cret-profile"));
        assert!(format!("{account:?}").contains("ada"));
    }

    #[rstest]
    fn new_account_exposes_all_fields() {
        let account = NewAccount::new("ada", "pw", "Ada Lovelace");
        assert_eq!(account.username().as_ref(), "ada");
        assert_eq!(account.password(), "pw");
        assert_eq!(account.name(), "Ada Lovelace");
    }
}
