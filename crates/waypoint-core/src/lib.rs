//! Business logic and trait definitions for Waypoint.
//!
//! This crate defines the "ports" (provider and repository traits) that the
//! infrastructure layer implements, plus the services built on them: the
//! conversational turn processor, the session-scoped chat service, and
//! search execution. It depends only on `waypoint-types` -- never on
//! `waypoint-infra` or any HTTP/IO crate.

pub mod chat;
pub mod llm;
pub mod search;
pub mod turn;
