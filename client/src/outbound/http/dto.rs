//! Wire DTOs for the remote API.
//!
//! Responses decode into these first and are mapped into domain records in
//! one pass; requests borrow from domain values so nothing secret is copied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AuthToken, AuthenticatedUser, LoginCredentials, NewAccount, ProfileUpdate, Story, StoryDraft,
    StoryId, StoryRecord, UserRecord, Username,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoryDto {
    story_id: String,
    author: String,
    title: String,
    url: String,
    username: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoryDto {
    pub(super) fn into_domain(self) -> Story {
        Story::from(StoryRecord {
            id: StoryId::new(self.story_id),
            author: self.author,
            title: self.title,
            url: self.url,
            username: Username::new(self.username),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    username: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    favorites: Vec<StoryDto>,
    #[serde(default)]
    stories: Vec<StoryDto>,
}

impl UserDto {
    pub(super) fn into_domain(self) -> UserRecord {
        UserRecord {
            username: Username::new(self.username),
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            favorites: into_stories(self.favorites),
            stories: into_stories(self.stories),
        }
    }
}

pub(super) fn into_stories(dtos: Vec<StoryDto>) -> Vec<Story> {
    dtos.into_iter().map(StoryDto::into_domain).collect()
}

#[derive(Debug, Deserialize)]
pub(super) struct StoriesEnvelope {
    #[serde(default)]
    pub(super) stories: Vec<StoryDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StoryEnvelope {
    pub(super) story: StoryDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserEnvelope {
    pub(super) user: UserDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthEnvelope {
    user: UserDto,
    token: Option<String>,
}

impl AuthEnvelope {
    /// Attach the returned token, or `fallback` when the server sent none.
    pub(super) fn into_domain(
        self,
        fallback: Option<&AuthToken>,
    ) -> Result<AuthenticatedUser, String> {
        let token = match (self.token, fallback) {
            (Some(token), _) if !token.trim().is_empty() => AuthToken::new(token),
            (_, Some(fallback)) => fallback.clone(),
            _ => return Err("response carried no token".to_owned()),
        };
        Ok(AuthenticatedUser {
            user: self.user.into_domain(),
            token,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyDto {
    title: Option<String>,
    message: Option<serde_json::Value>,
}

/// Pull the human-readable message out of a `{error:{title,message}}` body.
pub(super) fn error_message(body: &[u8]) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;
    let message = match envelope.error.message {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Some(other) => Some(other.to_string()),
        None => None,
    };
    message
        .or(envelope.error.title)
        .filter(|text| !text.trim().is_empty())
}

#[derive(Debug, Serialize)]
pub(super) struct TokenBody<'a> {
    pub(super) token: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct StoryFields<'a> {
    author: &'a str,
    title: &'a str,
    url: &'a str,
}

impl<'a> From<&'a StoryDraft> for StoryFields<'a> {
    fn from(draft: &'a StoryDraft) -> Self {
        Self {
            author: draft.author.as_str(),
            title: draft.title.as_str(),
            url: draft.url.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct StoryRequest<'a> {
    pub(super) token: &'a str,
    pub(super) story: StoryFields<'a>,
}

#[derive(Serialize)]
pub(super) struct SignupRequest<'a> {
    user: SignupUser<'a>,
}

#[derive(Serialize)]
struct SignupUser<'a> {
    username: &'a str,
    password: &'a str,
    name: &'a str,
}

impl<'a> From<&'a NewAccount> for SignupRequest<'a> {
    fn from(account: &'a NewAccount) -> Self {
        Self {
            user: SignupUser {
                username: account.username().as_ref(),
                password: account.password(),
                name: account.name(),
            },
        }
    }
}

#[derive(Serialize)]
pub(super) struct LoginRequest<'a> {
    user: LoginUser<'a>,
}

#[derive(Serialize)]
struct LoginUser<'a> {
    username: &'a str,
    password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequest<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            user: LoginUser {
                username: credentials.username().as_ref(),
                password: credentials.password(),
            },
        }
    }
}

#[derive(Serialize)]
pub(super) struct ProfileRequest<'a> {
    token: &'a str,
    user: ProfileUser<'a>,
}

#[derive(Serialize)]
struct ProfileUser<'a> {
    username: &'a str,
    name: &'a str,
    password: &'a str,
}

impl<'a> ProfileRequest<'a> {
    pub(super) fn new(
        token: &'a AuthToken,
        username: &'a Username,
        update: &'a ProfileUpdate,
    ) -> Self {
        Self {
            token: token.as_str(),
            user: ProfileUser {
                username: username.as_ref(),
                name: update.name(),
                password: update.password(),
            },
        }
    }
}
