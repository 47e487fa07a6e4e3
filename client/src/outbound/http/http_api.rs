//! Reqwest-backed adapter for the story and user ports.
//!
//! This adapter owns transport details only: URL building, request
//! serialisation, status mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::dto::{
    AuthEnvelope, LoginRequest, ProfileRequest, SignupRequest, StoriesEnvelope, StoryEnvelope,
    StoryFields, StoryRequest, TokenBody, UserEnvelope, error_message, into_stories,
};
use super::report::{Failure, RequestSummary, body_preview, report};
use crate::domain::ports::{ApiError, StoriesApi, UsersApi};
use crate::domain::{
    AuthToken, AuthenticatedUser, LoginCredentials, NewAccount, ProfileUpdate, Story, StoryDraft,
    StoryId, UserRecord, Username,
};

/// Public deployment of the API.
pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";
const USER_AGENT: &str = concat!("hack-or-snooze/", env!("CARGO_PKG_VERSION"));

/// HTTP client for every remote endpoint, rooted at one base URL.
pub struct HackOrSnoozeHttpApi {
    client: Client,
    base_url: Url,
}

/// One prepared request.
struct Call {
    method: Method,
    url: Url,
    summary: RequestSummary,
    body: Option<serde_json::Value>,
}

impl Call {
    fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|err| unsent(format!("request body could not be encoded: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    fn query(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }
}

impl HackOrSnoozeHttpApi {
    /// Build an adapter; `timeout` bounds each whole request when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn prepare(&self, method: Method, segments: &[&str]) -> Result<Call, ApiError> {
        let mut url = self.base_url.clone();
        match url.path_segments_mut() {
            Ok(mut path) => {
                path.pop_if_empty().extend(segments);
            }
            Err(()) => {
                return Err(unsent(format!(
                    "base url {} cannot carry a path",
                    self.base_url
                )));
            }
        }
        Ok(Call {
            summary: RequestSummary::new(method.clone(), &url),
            method,
            url,
            body: None,
        })
    }

    async fn execute(&self, call: &Call) -> Result<Vec<u8>, ApiError> {
        let mut request = self
            .client
            .request(call.method.clone(), call.url.clone())
            .header(ACCEPT, "application/json");
        if let Some(body) = &call.body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|err| map_transport_error(&call.summary, err))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|err| map_transport_error(&call.summary, err))?;
        if !status.is_success() {
            report(&Failure::Response {
                request: &call.summary,
                status,
                headers: &headers,
                body: &body,
            });
            return Err(map_status_error(status, &body));
        }
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(&self, call: &Call) -> Result<T, ApiError> {
        let body = self.execute(call).await?;
        serde_json::from_slice(&body)
            .map_err(|err| undecodable(&call.summary, format!("invalid JSON payload: {err}")))
    }
}

#[async_trait]
impl StoriesApi for HackOrSnoozeHttpApi {
    async fn list_stories(&self) -> Result<Vec<Story>, ApiError> {
        let call = self.prepare(Method::GET, &["stories"])?;
        let envelope: StoriesEnvelope = self.fetch(&call).await?;
        Ok(into_stories(envelope.stories))
    }

    async fn create_story(&self, token: &AuthToken, draft: &StoryDraft) -> Result<Story, ApiError> {
        let call = self
            .prepare(Method::POST, &["stories"])?
            .json(&StoryRequest {
                token: token.as_str(),
                story: StoryFields::from(draft),
            })?;
        let envelope: StoryEnvelope = self.fetch(&call).await?;
        Ok(envelope.story.into_domain())
    }

    async fn delete_story(&self, token: &AuthToken, id: &StoryId) -> Result<(), ApiError> {
        let call = self
            .prepare(Method::DELETE, &["stories", id.as_ref()])?
            .json(&TokenBody {
                token: token.as_str(),
            })?;
        self.execute(&call).await.map(drop)
    }

    async fn update_story(
        &self,
        token: &AuthToken,
        id: &StoryId,
        draft: &StoryDraft,
    ) -> Result<Story, ApiError> {
        let call = self
            .prepare(Method::PATCH, &["stories", id.as_ref()])?
            .json(&StoryRequest {
                token: token.as_str(),
                story: StoryFields::from(draft),
            })?;
        let envelope: StoryEnvelope = self.fetch(&call).await?;
        Ok(envelope.story.into_domain())
    }
}

#[async_trait]
impl UsersApi for HackOrSnoozeHttpApi {
    async fn sign_up(&self, account: &NewAccount) -> Result<AuthenticatedUser, ApiError> {
        let call = self
            .prepare(Method::POST, &["signup"])?
            .json(&SignupRequest::from(account))?;
        let envelope: AuthEnvelope = self.fetch(&call).await?;
        envelope
            .into_domain(None)
            .map_err(|message| undecodable(&call.summary, message))
    }

    async fn log_in(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, ApiError> {
        let call = self
            .prepare(Method::POST, &["login"])?
            .json(&LoginRequest::from(credentials))?;
        let envelope: AuthEnvelope = self.fetch(&call).await?;
        envelope
            .into_domain(None)
            .map_err(|message| undecodable(&call.summary, message))
    }

    async fn fetch_user(
        &self,
        token: &AuthToken,
        username: &Username,
    ) -> Result<UserRecord, ApiError> {
        let call = self
            .prepare(Method::GET, &["users", username.as_ref()])?
            .query("token", token.as_str());
        let envelope: UserEnvelope = self.fetch(&call).await?;
        Ok(envelope.user.into_domain())
    }

    async fn add_favorite(
        &self,
        token: &AuthToken,
        username: &Username,
        id: &StoryId,
    ) -> Result<UserRecord, ApiError> {
        let call = self
            .prepare(
                Method::POST,
                &["users", username.as_ref(), "favorites", id.as_ref()],
            )?
            .json(&TokenBody {
                token: token.as_str(),
            })?;
        let envelope: UserEnvelope = self.fetch(&call).await?;
        Ok(envelope.user.into_domain())
    }

    async fn remove_favorite(
        &self,
        token: &AuthToken,
        username: &Username,
        id: &StoryId,
    ) -> Result<(), ApiError> {
        let call = self
            .prepare(
                Method::DELETE,
                &["users", username.as_ref(), "favorites", id.as_ref()],
            )?
            .json(&TokenBody {
                token: token.as_str(),
            })?;
        self.execute(&call).await.map(drop)
    }

    async fn update_profile(
        &self,
        token: &AuthToken,
        username: &Username,
        update: &ProfileUpdate,
    ) -> Result<AuthenticatedUser, ApiError> {
        let call = self
            .prepare(Method::PATCH, &["users", username.as_ref()])?
            .json(&ProfileRequest::new(token, username, update))?;
        let envelope: AuthEnvelope = self.fetch(&call).await?;
        envelope
            .into_domain(Some(token))
            .map_err(|message| undecodable(&call.summary, message))
    }
}

fn unsent(message: String) -> ApiError {
    report(&Failure::Unsent { message: &message });
    ApiError::invalid_request(message)
}

fn undecodable(summary: &RequestSummary, message: String) -> ApiError {
    report(&Failure::Undecodable {
        request: summary,
        message: &message,
    });
    ApiError::decode(message)
}

fn map_transport_error(summary: &RequestSummary, error: reqwest::Error) -> ApiError {
    // The URL may carry the session token as a query parameter.
    let error = error.without_url();
    let message = error.to_string();
    if error.is_builder() {
        return unsent(message);
    }
    report(&Failure::NoResponse {
        request: summary,
        error: &message,
    });
    if error.is_timeout() {
        ApiError::timeout(message)
    } else {
        ApiError::transport(message)
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let detail = error_message(body).unwrap_or_else(|| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        detail
    };

    match status {
        StatusCode::CONFLICT => ApiError::conflict(message),
        StatusCode::UNAUTHORIZED => ApiError::unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ApiError::timeout(message),
        _ => ApiError::rejected(status.as_u16(), message),
    }
}
