//! Regression coverage for the user aggregate.

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::fixtures::{signed_in_user, story, story_titled, user_record};

fn ids(stories: &[Story]) -> Vec<&str> {
    stories.iter().map(|s| s.id().as_ref()).collect()
}

#[rstest]
fn from_record_populates_lists_without_token() {
    let record = user_record(
        "ada",
        vec![story("f1", "bob"), story("f2", "ada")],
        vec![story("s1", "ada")],
    );
    let user = User::from_record(record);

    assert_eq!(user.username().as_ref(), "ada");
    assert_eq!(user.name(), "ada name");
    assert_eq!(ids(user.favorites()), ["f1", "f2"]);
    assert_eq!(ids(user.own_stories()), ["s1"]);
    assert!(user.token().is_none());
}

#[rstest]
fn from_record_ignores_stories_posted_by_others() {
    let record = user_record("ada", vec![], vec![story("s1", "ada"), story("s2", "bob")]);
    let user = User::from_record(record);
    assert_eq!(ids(user.own_stories()), ["s1"]);
}

#[rstest]
fn from_record_drops_repeated_favorites() {
    let record = user_record("ada", vec![story("f1", "bob"), story("f1", "bob")], vec![]);
    assert_eq!(User::from_record(record).favorites().len(), 1);
}

#[rstest]
fn require_token_fails_without_credential() {
    let user = User::from_record(user_record("ada", vec![], vec![]));
    let err = user.require_token().expect_err("no token attached");
    assert_eq!(err.code(), ErrorCode::NotAuthenticated);
}

#[rstest]
fn require_token_rejects_blank_credential() {
    let user =
        User::from_record(user_record("ada", vec![], vec![])).with_token(AuthToken::new(" "));
    assert!(user.require_token().is_err());
}

#[rstest]
fn with_token_attaches_credential() {
    let user = signed_in_user("ada", vec![], vec![]);
    let token = user.require_token().expect("token attached");
    assert!(!token.is_empty());
}

#[rstest]
fn owns_and_is_favorite_check_ids() {
    let user = signed_in_user("ada", vec![story("f1", "bob")], vec![story("s1", "ada")]);
    assert!(user.owns(&StoryId::new("s1")));
    assert!(!user.owns(&StoryId::new("f1")));
    assert!(user.is_favorite(&StoryId::new("f1")));
    assert!(!user.is_favorite(&StoryId::new("s1")));
}

#[rstest]
fn push_own_story_moves_existing_id_to_tail() {
    let mut user = signed_in_user("ada", vec![], vec![story("s1", "ada"), story("s2", "ada")]);
    user.push_own_story(story_titled("s1", "ada", "edited"));
    assert_eq!(ids(user.own_stories()), ["s2", "s1"]);
    assert_eq!(user.own_stories()[1].title(), "edited");
}

#[rstest]
fn remove_favorite_twice_removes_nothing_the_second_time() {
    let mut user = signed_in_user(
        "ada",
        vec![story("f1", "bob"), story("f2", "bob"), story("f3", "bob")],
        vec![],
    );
    let id = StoryId::new("f2");
    assert!(user.remove_favorite(&id).is_some());
    assert!(user.remove_favorite(&id).is_none());
    assert_eq!(ids(user.favorites()), ["f1", "f3"]);
}

#[rstest]
fn refresh_favorite_replaces_in_place() {
    let mut user = signed_in_user("ada", vec![story("f1", "ada"), story("f2", "bob")], vec![]);
    assert!(user.refresh_favorite(&story_titled("f1", "ada", "edited")));
    assert_eq!(ids(user.favorites()), ["f1", "f2"]);
    assert_eq!(user.favorites()[0].title(), "edited");
    assert!(!user.refresh_favorite(&story("zz", "ada")));
}

#[rstest]
fn push_favorite_does_not_duplicate() {
    let mut user = signed_in_user("ada", vec![story("f1", "bob")], vec![]);
    user.push_favorite(story("f1", "bob"));
    user.push_favorite(story("f2", "bob"));
    assert_eq!(ids(user.favorites()), ["f1", "f2"]);
}

#[rstest]
fn token_debug_is_redacted() {
    let rendered = format!("{:?}", AuthToken::new("super-secret"));
    assert!(!rendered.contains("super-secret"));
}
