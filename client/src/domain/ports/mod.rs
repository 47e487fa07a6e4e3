//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod api_error;
mod session_store;
mod stories_api;
mod users_api;

pub use api_error::ApiError;
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{FixtureSessionStore, SessionStore, SessionStoreError, StoredSession};
#[cfg(test)]
pub use stories_api::MockStoriesApi;
pub use stories_api::StoriesApi;
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::UsersApi;
