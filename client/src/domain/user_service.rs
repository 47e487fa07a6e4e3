//! Remote-synchronised operations on the signed-in user.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{ApiError, UsersApi};
use crate::domain::{
    AuthToken, AuthenticatedUser, Error, LoginCredentials, NewAccount, ProfileUpdate, Story,
    StoryId, User, UserRecord, Username,
};

/// User service backed by a [`UsersApi`] port.
pub struct UserService<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> UserService<A> {
    /// Create a service over the given port.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A> UserService<A>
where
    A: UsersApi + ?Sized,
{
    /// Register a new account.
    ///
    /// A 409 from the remote API becomes
    /// [`ErrorCode::UsernameTaken`](crate::domain::ErrorCode::UsernameTaken).
    pub async fn create(&self, account: &NewAccount) -> Result<User, Error> {
        let AuthenticatedUser { user, token } =
            self.api.sign_up(account).await.map_err(|err| match err {
                ApiError::Conflict { message } => {
                    debug!(username = %account.username(), "signup conflict");
                    Error::username_taken(message)
                }
                other => Error::from_port("sign up", other),
            })?;
        let record = UserRecord {
            favorites: Vec::new(),
            stories: Vec::new(),
            ..user
        };
        Ok(User::from_record(record).with_token(token))
    }

    /// Exchange credentials for a fully populated user.
    ///
    /// A 401 (or a 404 for an unknown account) becomes
    /// [`ErrorCode::InvalidCredentials`](crate::domain::ErrorCode::InvalidCredentials).
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let AuthenticatedUser { user, token } =
            self.api.log_in(credentials).await.map_err(|err| match err {
                ApiError::Unauthorized { message } | ApiError::NotFound { message } => {
                    debug!(username = %credentials.username(), "login refused");
                    Error::invalid_credentials(message)
                }
                other => Error::from_port("log in", other),
            })?;
        Ok(User::from_record(user).with_token(token))
    }

    /// Rebuild the user from a cached credential pair.
    ///
    /// Returns `Ok(None)` without a remote call when either value is absent
    /// or blank.
    pub async fn restore_session(
        &self,
        token: Option<AuthToken>,
        username: Option<Username>,
    ) -> Result<Option<User>, Error> {
        let (Some(token), Some(username)) = (
            token.filter(|t| !t.is_empty()),
            username.filter(|u| !u.is_empty()),
        ) else {
            return Ok(None);
        };
        let record = self
            .api
            .fetch_user(&token, &username)
            .await
            .map_err(|err| Error::from_port("fetch user", err))?;
        Ok(Some(User::from_record(record).with_token(token)))
    }

    /// Favorite a story.
    ///
    /// The response carries the authoritative favorites. When it is not
    /// larger than the local set nothing changes and `Ok(None)` is returned.
    /// Otherwise the response entry with the requested id is recorded; if the
    /// server echoed no such entry its last favorite is taken instead.
    pub async fn add_favorite_story(
        &self,
        user: &mut User,
        id: &StoryId,
    ) -> Result<Option<Story>, Error> {
        let token = user.require_token()?;
        let record = self
            .api
            .add_favorite(token, user.username(), id)
            .await
            .map_err(|err| Error::from_port("add favorite", err))?;

        if record.favorites.len() <= user.favorites().len() {
            debug!(story_id = %id, "favorites did not grow");
            return Ok(None);
        }
        let mut favorites = record.favorites;
        let added = match favorites.iter().position(|story| story.id() == id) {
            Some(index) => favorites.swap_remove(index),
            None => {
                warn!(
                    story_id = %id,
                    "requested favorite missing from response; using last entry"
                );
                match favorites.pop() {
                    Some(story) => story,
                    None => return Ok(None),
                }
            }
        };
        user.push_favorite(added.clone());
        Ok(Some(added))
    }

    /// Unfavorite a story.
    ///
    /// The local favorite is dropped only after the remote delete succeeds.
    /// Returns the removed entry, or `None` when no local favorite matched.
    pub async fn remove_favorite_story(
        &self,
        user: &mut User,
        id: &StoryId,
    ) -> Result<Option<Story>, Error> {
        let token = user.require_token()?;
        self.api
            .remove_favorite(token, user.username(), id)
            .await
            .map_err(|err| Error::from_port("remove favorite", err))?;
        let removed = user.remove_favorite(id);
        if removed.is_none() {
            debug!(story_id = %id, "no local favorite to remove");
        }
        Ok(removed)
    }

    /// Change the display name and password.
    ///
    /// On success `user` takes the confirmed name and a copy carrying the
    /// freshly issued token is returned; callers replace their stored token
    /// with it.
    pub async fn update_profile(
        &self,
        user: &mut User,
        update: &ProfileUpdate,
    ) -> Result<User, Error> {
        let token = user.require_token()?;
        let AuthenticatedUser { user: record, token } = self
            .api
            .update_profile(token, user.username(), update)
            .await
            .map_err(|err| Error::from_port("update profile", err))?;
        user.set_name(record.name);
        Ok(user.clone().with_token(token))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
