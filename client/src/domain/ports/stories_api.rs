//! Driven port for the remote story collection.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{AuthToken, Story, StoryDraft, StoryId};

/// Port for reading and changing stories on the remote API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoriesApi: Send + Sync {
    /// Fetch every story in server order.
    async fn list_stories(&self) -> Result<Vec<Story>, ApiError>;

    /// Post a new story and return the server's copy.
    async fn create_story(&self, token: &AuthToken, draft: &StoryDraft) -> Result<Story, ApiError>;

    /// Delete a story.
    async fn delete_story(&self, token: &AuthToken, id: &StoryId) -> Result<(), ApiError>;

    /// Replace a story's author, title, and url; returns the server's copy.
    async fn update_story(
        &self,
        token: &AuthToken,
        id: &StoryId,
        draft: &StoryDraft,
    ) -> Result<Story, ApiError>;
}
