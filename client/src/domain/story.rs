//! Story entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Username;

/// Identifier the remote API assigns to a story.
///
/// The value is opaque to the client; it is compared, printed, and sent back
/// in request paths, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<&str> for StoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Plain attribute record a [`Story`] is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRecord {
    /// Server-assigned identifier.
    pub id: StoryId,
    /// Free-text author credit.
    pub author: String,
    /// Link title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Account that posted the story.
    pub username: Username,
    /// Creation timestamp reported by the server.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp reported by the server.
    pub updated_at: DateTime<Utc>,
}

/// Immutable snapshot of one posted link.
///
/// ## Invariants
/// - Never mutated after construction; an edit produces a new `Story` that
///   replaces the old one wherever it is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    id: StoryId,
    author: String,
    title: String,
    url: String,
    username: Username,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        let StoryRecord {
            id,
            author,
            title,
            url,
            username,
            created_at,
            updated_at,
        } = record;
        Self {
            id,
            author,
            title,
            url,
            username,
            created_at,
            updated_at,
        }
    }
}

impl Story {
    /// Server-assigned identifier.
    pub fn id(&self) -> &StoryId {
        &self.id
    }

    /// Author credit.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Link title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Link target.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Account that posted the story.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Host part of the url with any leading `www.` removed.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use hack_or_snooze::domain::{Story, StoryId, StoryRecord, Username};
    ///
    /// let story = Story::from(StoryRecord {
    ///     id: StoryId::new("s-1"),
    ///     author: "Ada".into(),
    ///     title: "Notes".into(),
    ///     url: "https://www.example.com/notes".into(),
    ///     username: Username::new("ada"),
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// });
    /// assert_eq!(story.hostname(), "example.com");
    /// ```
    pub fn hostname(&self) -> &str {
        hostname_of(&self.url)
    }
}

fn hostname_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = without_scheme.split('/').next().unwrap_or(without_scheme);
    host.strip_prefix("www.").unwrap_or(host)
}

/// Author, title, and url submitted when creating or editing a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    /// Author credit.
    pub author: String,
    /// Link title.
    pub title: String,
    /// Link target.
    pub url: String,
}

impl StoryDraft {
    /// Bundle the three user-supplied fields.
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Remove the first story with `id`, returning it.
pub(crate) fn take_by_id(stories: &mut Vec<Story>, id: &StoryId) -> Option<Story> {
    let index = stories.iter().position(|story| story.id() == id)?;
    Some(stories.remove(index))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::fixtures::story;
    use rstest::rstest;

    #[rstest]
    #[case("https://www.example.com/path/to", "example.com")]
    #[case("http://news.ycombinator.com", "news.ycombinator.com")]
    #[case("example.org/some/page", "example.org")]
    #[case("www.rithmschool.com", "rithmschool.com")]
    #[case("https://example.com:8080/x", "example.com:8080")]
    #[case("", "")]
    fn hostname_strips_scheme_path_and_www(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(hostname_of(url), expected);
    }

    #[rstest]
    fn take_by_id_removes_only_the_match() {
        let mut stories = vec![story("a", "ann"), story("b", "bob"), story("c", "cy")];
        let taken = take_by_id(&mut stories, &StoryId::new("b")).expect("b is present");
        assert_eq!(taken.id().as_ref(), "b");
        let remaining: Vec<_> = stories.iter().map(|s| s.id().as_ref()).collect();
        assert_eq!(remaining, ["a", "c"]);
    }

    #[rstest]
    fn take_by_id_leaves_vector_alone_when_missing() {
        let mut stories = vec![story("a", "ann")];
        assert!(take_by_id(&mut stories, &StoryId::new("zzz")).is_none());
        assert_eq!(stories.len(), 1);
    }
}
