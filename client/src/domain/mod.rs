//! Domain entities, aggregates, and synchronisation services.
//!
//! Purpose: model the stories and the signed-in user as local aggregates and
//! keep them consistent with the remote API. Aggregates never talk to the
//! network themselves; the services in this module call a port, and only
//! mutate local state once the remote side has confirmed the change.
//!
//! Public surface:
//! - [`Story`], [`StoryId`], [`StoryDraft`]: one posted link.
//! - [`StoryList`]: ordered, id-unique collection of stories.
//! - [`User`], [`Username`], [`AuthToken`]: the signed-in identity.
//! - [`StoryListService`], [`UserService`]: remote-synchronised operations.
//! - [`Error`], [`ErrorCode`]: typed failures returned by every operation.

pub mod auth;
pub mod error;
pub mod ports;
mod story;
mod story_list;
mod story_list_service;
mod user;
mod user_service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::auth::{LoginCredentials, NewAccount, ProfileUpdate};
pub use self::error::{Error, ErrorCode};
pub use self::story::{Story, StoryDraft, StoryId, StoryRecord};
pub use self::story_list::StoryList;
pub use self::story_list_service::StoryListService;
pub use self::user::{AuthToken, AuthenticatedUser, User, UserRecord, Username};
pub use self::user_service::UserService;
