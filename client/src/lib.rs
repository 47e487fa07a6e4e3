//! Client library for the Hack or Snooze link-sharing API.
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] holds the Story and User aggregates, the services that keep
//!   them in step with the remote API, and the ports those services depend on.
//! - [`outbound`] implements the ports: a reqwest adapter for the REST API and
//!   a file-backed session store.
//! - [`inbound`] drives the domain from the command line.
//! - [`config`] loads client settings from the environment.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
