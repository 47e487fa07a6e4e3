//! Reqwest adapter for the Hack or Snooze REST API.
//!
//! Implements the `StoriesApi` and `UsersApi` ports. Every failed call is
//! passed to the reporter in [`report`] before it is mapped to an
//! `ApiError`.

mod dto;
mod http_api;
pub mod report;

pub use http_api::{DEFAULT_BASE_URL, HackOrSnoozeHttpApi};
