//! StoryList aggregate.

use std::collections::HashSet;
use std::slice;

use tracing::debug;

use super::story::take_by_id;
use super::{Story, StoryId};

/// Ordered collection of stories mirroring the remote story collection.
///
/// ## Invariants
/// - Order is the server's order, followed by local appends.
/// - No two entries share an id. Construction keeps the first occurrence;
///   appending a story whose id is already present moves it to the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryList {
    stories: Vec<Story>,
}

impl StoryList {
    /// Wrap stories in server order, dropping repeated ids.
    pub fn new(stories: Vec<Story>) -> Self {
        let mut seen = HashSet::with_capacity(stories.len());
        let total = stories.len();
        let stories: Vec<Story> = stories
            .into_iter()
            .filter(|story| seen.insert(story.id().clone()))
            .collect();
        if stories.len() != total {
            debug!(
                dropped = total - stories.len(),
                "discarded stories with repeated ids"
            );
        }
        Self { stories }
    }

    /// Stories in list order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Iterate stories in list order.
    pub fn iter(&self) -> slice::Iter<'_, Story> {
        self.stories.iter()
    }

    /// Number of stories held.
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Whether the list holds no stories.
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Look a story up by id.
    pub fn get(&self, id: &StoryId) -> Option<&Story> {
        self.stories.iter().find(|story| story.id() == id)
    }

    /// Whether a story with `id` is present.
    pub fn contains(&self, id: &StoryId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in list order.
    pub fn ids(&self) -> impl Iterator<Item = &StoryId> {
        self.stories.iter().map(Story::id)
    }

    pub(crate) fn append(&mut self, story: Story) {
        let _stale = take_by_id(&mut self.stories, story.id());
        self.stories.push(story);
    }

    pub(crate) fn remove(&mut self, id: &StoryId) -> Option<Story> {
        take_by_id(&mut self.stories, id)
    }
}

impl<'a> IntoIterator for &'a StoryList {
    type Item = &'a Story;
    type IntoIter = slice::Iter<'a, Story>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
