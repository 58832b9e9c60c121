//! Conversation state: session repository trait, chat service, turn gate.

pub mod gate;
pub mod repository;
pub mod service;
