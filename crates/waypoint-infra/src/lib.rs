//! Infrastructure layer for Waypoint.
//!
//! Contains implementations of the traits defined in `waypoint-core`:
//! the Gemini inference client, the Google Places text-search client, the
//! in-memory session repository, environment credential resolution, and
//! the config loader.

pub mod config;
pub mod llm;
pub mod places;
pub mod secret;
pub mod session;
