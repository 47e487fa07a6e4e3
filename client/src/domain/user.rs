//! User aggregate and the identity primitives it is built from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::story::take_by_id;
use super::{Error, Story, StoryId};

/// Account name; the identity key for every user-scoped request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Wrap a raw account name.
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    /// Whether the name is blank.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque session credential issued by the remote API.
///
/// The value is wiped from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Raw token, for request bodies and the session cache only.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the token is blank.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Plain user attributes as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Account name.
    pub username: Username,
    /// Display name.
    pub name: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last profile change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Favorited stories in server order.
    pub favorites: Vec<Story>,
    /// Stories posted by this user in server order.
    pub stories: Vec<Story>,
}

/// Signup, login, and profile responses: the record plus a fresh credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User attributes.
    pub user: UserRecord,
    /// Credential issued alongside the record.
    pub token: AuthToken,
}

/// The signed-in identity with its favorited and owned story references.
///
/// Construction is two-phase because the remote API returns the user
/// attributes and the credential side by side: build the plain aggregate with
/// [`User::from_record`], then attach the credential with [`User::with_token`].
///
/// ## Invariants
/// - Every entry in `own_stories` was posted by `username`.
/// - Neither sequence holds two stories with the same id.
/// - Sequences only change through the services, after the remote API has
///   confirmed the change.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use hack_or_snooze::domain::{AuthToken, User, UserRecord, Username};
///
/// let user = User::from_record(UserRecord {
///     username: Username::new("ada"),
///     name: "Ada".into(),
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
///     favorites: Vec::new(),
///     stories: Vec::new(),
/// })
/// .with_token(AuthToken::new("t0k3n"));
/// assert!(user.token().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    token: Option<AuthToken>,
    favorites: Vec<Story>,
    own_stories: Vec<Story>,
}

impl User {
    /// Build an unauthenticated aggregate from the remote record.
    ///
    /// Repeated ids are dropped, and entries in the record's story list that
    /// were posted by someone else are not treated as owned.
    pub fn from_record(record: UserRecord) -> Self {
        let UserRecord {
            username,
            name,
            created_at,
            updated_at,
            favorites,
            stories,
        } = record;
        let own_stories = stories
            .into_iter()
            .filter(|story| story.username() == &username)
            .collect();
        Self {
            username,
            name,
            created_at,
            updated_at,
            token: None,
            favorites: dedupe(favorites),
            own_stories: dedupe(own_stories),
        }
    }

    /// Attach the session credential.
    #[must_use]
    pub fn with_token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Account creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last profile change timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Session credential, absent until attached.
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Session credential, or [`ErrorCode::NotAuthenticated`](super::ErrorCode::NotAuthenticated).
    pub fn require_token(&self) -> Result<&AuthToken, Error> {
        self.token
            .as_ref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::not_authenticated("log in to continue"))
    }

    /// Favorited stories in the order they were added.
    pub fn favorites(&self) -> &[Story] {
        &self.favorites
    }

    /// Stories this user posted.
    pub fn own_stories(&self) -> &[Story] {
        &self.own_stories
    }

    /// Whether the user posted the story with `id`.
    pub fn owns(&self, id: &StoryId) -> bool {
        self.own_stories.iter().any(|story| story.id() == id)
    }

    /// Whether the story with `id` is among the favorites.
    pub fn is_favorite(&self, id: &StoryId) -> bool {
        self.favorites.iter().any(|story| story.id() == id)
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn push_own_story(&mut self, story: Story) {
        let _stale = take_by_id(&mut self.own_stories, story.id());
        self.own_stories.push(story);
    }

    pub(crate) fn remove_own_story(&mut self, id: &StoryId) -> Option<Story> {
        take_by_id(&mut self.own_stories, id)
    }

    pub(crate) fn push_favorite(&mut self, story: Story) {
        if let Some(slot) = self.favorites.iter_mut().find(|s| s.id() == story.id()) {
            *slot = story;
        } else {
            self.favorites.push(story);
        }
    }

    pub(crate) fn remove_favorite(&mut self, id: &StoryId) -> Option<Story> {
        take_by_id(&mut self.favorites, id)
    }

    /// Replace a favorite in place; returns whether one matched.
    pub(crate) fn refresh_favorite(&mut self, story: &Story) -> bool {
        match self.favorites.iter_mut().find(|s| s.id() == story.id()) {
            Some(slot) => {
                *slot = story.clone();
                true
            }
            None => false,
        }
    }
}

fn dedupe(stories: Vec<Story>) -> Vec<Story> {
    let mut kept: Vec<Story> = Vec::with_capacity(stories.len());
    for story in stories {
        if !kept.iter().any(|s| s.id() == story.id()) {
            kept.push(story);
        }
    }
    kept
}

#[cfg(test)]
mod tests;
