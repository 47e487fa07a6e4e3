//! Outbound adapters: the remote API over HTTP and the on-disk session cache.

pub mod http;
pub mod session_file;
