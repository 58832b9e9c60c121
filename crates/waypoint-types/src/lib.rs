//! Shared domain types for Waypoint.
//!
//! This crate contains the core domain types used across the Waypoint
//! service: chat sessions, collected slot-filling state, places, search
//! directives, LLM request/response shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod place;
pub mod search;
