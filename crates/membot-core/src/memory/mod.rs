//! Conversational memory for membot.
//!
//! Two tiers: a bounded FIFO `ShortTermBuffer` of recent turns that is
//! always sent as context, and a `LongTermStore` of embedded records
//! searched by cosine similarity. The `MemoryOrchestrator` composes both
//! into the message sequence for each chat call.

pub mod buffer;
pub mod embedder;
pub mod extractor;
pub mod index;
pub mod orchestrator;
pub mod store;
