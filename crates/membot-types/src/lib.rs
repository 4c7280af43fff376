//! Shared domain types for membot.
//!
//! This crate contains the data shapes used across the membot workspace:
//! chat messages, memory records, configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod memory;
