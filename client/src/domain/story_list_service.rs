//! Remote-synchronised operations on the story list.
//!
//! Each operation calls the stories port first and touches the local
//! [`StoryList`] and [`User`] only once the remote side has confirmed.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::StoriesApi;
use crate::domain::{Error, Story, StoryDraft, StoryId, StoryList, User};

/// Story list service backed by a [`StoriesApi`] port.
pub struct StoryListService<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> StoryListService<A> {
    /// Create a service over the given port.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A> StoryListService<A>
where
    A: StoriesApi + ?Sized,
{
    /// Fetch every story and build a fresh list in server order.
    pub async fn fetch_all(&self) -> Result<StoryList, Error> {
        let stories = self
            .api
            .list_stories()
            .await
            .map_err(|err| Error::from_port("list stories", err))?;
        Ok(StoryList::new(stories))
    }

    /// Submit a story for `owner`.
    ///
    /// On success the server's copy is appended to `list` and to the owner's
    /// own stories. On failure neither is touched.
    pub async fn add_story(
        &self,
        list: &mut StoryList,
        owner: &mut User,
        draft: &StoryDraft,
    ) -> Result<Story, Error> {
        let token = owner.require_token()?;
        let story = self
            .api
            .create_story(token, draft)
            .await
            .map_err(|err| Error::from_port("create story", err))?;
        list.append(story.clone());
        owner.push_own_story(story.clone());
        debug!(story_id = %story.id(), "story added");
        Ok(story)
    }

    /// Delete one of `owner`'s stories.
    ///
    /// Fails with [`ErrorCode::NotOwner`](crate::domain::ErrorCode::NotOwner)
    /// before any remote call when `owner` did not post `id`. Once the remote
    /// delete succeeds the story leaves the list, the owner's own stories, and
    /// the owner's favorites.
    pub async fn remove_story(
        &self,
        list: &mut StoryList,
        owner: &mut User,
        id: &StoryId,
    ) -> Result<(), Error> {
        Self::ensure_owner(owner, id)?;
        let token = owner.require_token()?;
        self.api
            .delete_story(token, id)
            .await
            .map_err(|err| Error::from_port("delete story", err))?;
        owner.remove_own_story(id);
        owner.remove_favorite(id);
        list.remove(id);
        debug!(story_id = %id, "story removed");
        Ok(())
    }

    /// Replace the author, title, and url of one of `owner`'s stories.
    ///
    /// The server's copy moves to the tail of `list` and of the owner's own
    /// stories; a favorite reference is replaced where it stands.
    pub async fn update_story(
        &self,
        list: &mut StoryList,
        owner: &mut User,
        id: &StoryId,
        draft: &StoryDraft,
    ) -> Result<Story, Error> {
        Self::ensure_owner(owner, id)?;
        let token = owner.require_token()?;
        let story = self
            .api
            .update_story(token, id, draft)
            .await
            .map_err(|err| Error::from_port("update story", err))?;
        list.remove(id);
        list.append(story.clone());
        owner.remove_own_story(id);
        owner.push_own_story(story.clone());
        owner.refresh_favorite(&story);
        debug!(story_id = %story.id(), "story updated");
        Ok(story)
    }

    fn ensure_owner(owner: &User, id: &StoryId) -> Result<(), Error> {
        if owner.owns(id) {
            Ok(())
        } else {
            Err(Error::not_owner(format!(
                "story {id} was not posted by {}",
                owner.username()
            )))
        }
    }
}

#[cfg(test)]
#[path = "story_list_service_tests.rs"]
mod tests;
