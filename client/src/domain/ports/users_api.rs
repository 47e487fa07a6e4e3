//! Driven port for remote account and favorites endpoints.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{
    AuthToken, AuthenticatedUser, LoginCredentials, NewAccount, ProfileUpdate, StoryId, UserRecord,
    Username,
};

/// Port for the remote user record and its favorites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Register an account; the record comes back with a fresh credential.
    async fn sign_up(&self, account: &NewAccount) -> Result<AuthenticatedUser, ApiError>;

    /// Exchange credentials for the full record and a fresh credential.
    async fn log_in(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, ApiError>;

    /// Fetch the full record for a cached credential.
    async fn fetch_user(
        &self,
        token: &AuthToken,
        username: &Username,
    ) -> Result<UserRecord, ApiError>;

    /// Favorite a story; returns the record with the authoritative favorites.
    async fn add_favorite(
        &self,
        token: &AuthToken,
        username: &Username,
        id: &StoryId,
    ) -> Result<UserRecord, ApiError>;

    /// Unfavorite a story.
    async fn remove_favorite(
        &self,
        token: &AuthToken,
        username: &Username,
        id: &StoryId,
    ) -> Result<(), ApiError>;

    /// Change display name and password; a new credential is issued.
    async fn update_profile(
        &self,
        token: &AuthToken,
        username: &Username,
        update: &ProfileUpdate,
    ) -> Result<AuthenticatedUser, ApiError>;
}
