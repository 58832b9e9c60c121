//! Waypoint application layer: REST API and CLI.
//!
//! Exposed as a library so integration tests can build the router against
//! a hand-wired [`state::AppState`].

pub mod cli;
pub mod http;
pub mod state;
