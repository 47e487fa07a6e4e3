//! Adapter tests against a wiremock stand-in for the remote API.

use std::net::TcpListener;

use reqwest::Url;
use rstest::rstest;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hack_or_snooze::domain::ports::{ApiError, StoriesApi, UsersApi};
use hack_or_snooze::domain::{
    AuthToken, LoginCredentials, NewAccount, ProfileUpdate, StoryDraft, StoryId, Username,
};
use hack_or_snooze::outbound::http::HackOrSnoozeHttpApi;

fn story_json(id: &str, username: &str) -> Value {
    json!({
        "storyId": id,
        "author": "Author",
        "title": format!("Title {id}"),
        "url": format!("https://www.example.com/{id}"),
        "username": username,
        "createdAt": "2024-01-02T03:04:05.678Z",
        "updatedAt": "2024-01-02T03:04:05.678Z"
    })
}

fn user_json(username: &str, favorites: Vec<Value>, stories: Vec<Value>) -> Value {
    json!({
        "username": username,
        "name": "Ada",
        "createdAt": "2024-01-02T03:04:05.678Z",
        "updatedAt": "2024-01-02T03:04:05.678Z",
        "favorites": favorites,
        "stories": stories
    })
}

fn api(server: &MockServer) -> HackOrSnoozeHttpApi {
    let base = Url::parse(&server.uri()).expect("mock server uri parses");
    HackOrSnoozeHttpApi::new(base, None).expect("client builds")
}

#[tokio::test]
async fn list_stories_decodes_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [story_json("b", "bob"), story_json("a", "ada")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stories = api(&server).list_stories().await.expect("list succeeds");
    let ids: Vec<&str> = stories.iter().map(|s| s.id().as_ref()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(stories[0].hostname(), "example.com");
}

#[tokio::test]
async fn create_story_posts_token_and_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stories"))
        .and(body_json(json!({
            "token": "tok",
            "story": {"author": "A", "title": "T", "url": "https://x.test"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "story": story_json("new", "ada")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let story = api(&server)
        .create_story(
            &AuthToken::new("tok"),
            &StoryDraft::new("A", "T", "https://x.test"),
        )
        .await
        .expect("create succeeds");
    assert_eq!(story.id().as_ref(), "new");
}

#[tokio::test]
async fn delete_story_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/stories/s-1"))
        .and(body_json(json!({"token": "tok"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("whatever"))
        .expect(1)
        .mount(&server)
        .await;

    api(&server)
        .delete_story(&AuthToken::new("tok"), &StoryId::new("s-1"))
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn update_story_patches_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/stories/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "story": story_json("s-1", "ada")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let story = api(&server)
        .update_story(
            &AuthToken::new("tok"),
            &StoryId::new("s-1"),
            &StoryDraft::new("A", "T", "https://x.test"),
        )
        .await
        .expect("update succeeds");
    assert_eq!(story.id().as_ref(), "s-1");
}

#[tokio::test]
async fn sign_up_conflict_maps_to_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"status": 409, "title": "Conflict", "message": "Username 'ada' already taken"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = api(&server)
        .sign_up(&NewAccount::new("ada", "pw", "Ada"))
        .await
        .expect_err("duplicate");
    assert_eq!(err, ApiError::conflict("Username 'ada' already taken"));
}

#[tokio::test]
async fn log_in_returns_record_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "user": {"username": "ada", "password": "pw"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json("ada", vec![story_json("f1", "bob")], vec![story_json("s1", "ada")]),
            "token": "fresh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let authenticated = api(&server)
        .log_in(&LoginCredentials::new("ada", "pw"))
        .await
        .expect("login succeeds");
    assert_eq!(authenticated.token.as_str(), "fresh");
    assert_eq!(authenticated.user.favorites.len(), 1);
    assert_eq!(authenticated.user.stories.len(), 1);
}

#[rstest]
#[case(401)]
#[case(404)]
#[tokio::test]
async fn log_in_refusals_keep_their_status(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let err = api(&server)
        .log_in(&LoginCredentials::new("ada", "bad"))
        .await
        .expect_err("refused");
    assert_eq!(err.status(), Some(status));
}

#[tokio::test]
async fn fetch_user_sends_token_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ada"))
        .and(query_param("token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "username": "ada",
                "name": "Ada",
                "createdAt": "2024-01-02T03:04:05Z",
                "updatedAt": "2024-01-02T03:04:05Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = api(&server)
        .fetch_user(&AuthToken::new("tok"), &Username::new("ada"))
        .await
        .expect("fetch succeeds");
    assert!(record.favorites.is_empty());
}

#[tokio::test]
async fn add_favorite_returns_updated_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/ada/favorites/s-9"))
        .and(body_json(json!({"token": "tok"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json("ada", vec![story_json("s-9", "bob")], vec![])
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = api(&server)
        .add_favorite(
            &AuthToken::new("tok"),
            &Username::new("ada"),
            &StoryId::new("s-9"),
        )
        .await
        .expect("favorite succeeds");
    assert_eq!(record.favorites.len(), 1);
}

#[tokio::test]
async fn update_profile_keeps_token_when_response_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/ada"))
        .and(body_json(json!({
            "token": "tok",
            "user": {"username": "ada", "name": "Ada L", "password": "new"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json("ada", vec![], vec![])
        })))
        .expect(1)
        .mount(&server)
        .await;

    let authenticated = api(&server)
        .update_profile(
            &AuthToken::new("tok"),
            &Username::new("ada"),
            &ProfileUpdate::new("Ada L", "new"),
        )
        .await
        .expect("profile update succeeds");
    assert_eq!(authenticated.token.as_str(), "tok");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let err = api(&server).list_stories().await.expect_err("bad body");
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    let base = Url::parse(&format!("http://127.0.0.1:{port}")).expect("uri parses");

    let err = HackOrSnoozeHttpApi::new(base, None)
        .expect("client builds")
        .list_stories()
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
}
