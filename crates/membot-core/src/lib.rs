//! Memory orchestration logic and port trait definitions for membot.
//!
//! This crate defines the "ports" (`Embedder`, `VectorIndex`,
//! `ChatProvider`) that the infrastructure layer implements, along with the
//! concrete memory machinery: the short-term buffer, the long-term store,
//! and the orchestrator that assembles chat context from both. It depends
//! only on `membot-types` -- never on `membot-infra` or any IO crate.

pub mod chat;
pub mod memory;
