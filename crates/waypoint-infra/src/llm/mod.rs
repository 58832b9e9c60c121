//! Inference-service client implementations.

pub mod gemini;
