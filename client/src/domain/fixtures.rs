//! Builders shared by unit tests across the domain and its adapters.

use chrono::{DateTime, Utc};

use super::{AuthToken, Story, StoryId, StoryRecord, User, UserRecord, Username};

pub(crate) const TOKEN: &str = "token-abc";

pub(crate) fn timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("fixed timestamp is in range")
}

pub(crate) fn story_titled(id: &str, username: &str, title: &str) -> Story {
    Story::from(StoryRecord {
        id: StoryId::new(id),
        author: format!("{username} author"),
        title: title.to_owned(),
        url: format!("https://example.com/{id}"),
        username: Username::new(username),
        created_at: timestamp(),
        updated_at: timestamp(),
    })
}

pub(crate) fn story(id: &str, username: &str) -> Story {
    story_titled(id, username, &format!("Story {id}"))
}

pub(crate) fn user_record(
    username: &str,
    favorites: Vec<Story>,
    stories: Vec<Story>,
) -> UserRecord {
    UserRecord {
        username: Username::new(username),
        name: format!("{username} name"),
        created_at: timestamp(),
        updated_at: timestamp(),
        favorites,
        stories,
    }
}

pub(crate) fn signed_in_user(username: &str, favorites: Vec<Story>, own: Vec<Story>) -> User {
    User::from_record(user_record(username, favorites, own)).with_token(AuthToken::new(TOKEN))
}
