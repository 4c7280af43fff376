//! Chat boundary for membot.
//!
//! Defines the `ChatProvider` port the infrastructure layer implements and
//! the `ChatService` that drives a full turn: context assembly, the
//! completion call, and recording the reply.

pub mod provider;
pub mod service;
