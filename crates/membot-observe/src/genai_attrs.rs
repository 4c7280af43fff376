//! OpenTelemetry GenAI Semantic Convention attribute values.
//!
//! Attribute names (`gen_ai.operation.name`, `gen_ai.provider.name`,
//! `gen_ai.request.model`) are spelled inline at the instrumentation sites,
//! since tracing macro field names must be literals. The constants here are
//! the attribute *values* shared across those sites.
//!
//! Span naming convention: `"gen_ai.{operation}"` (e.g., `"gen_ai.chat"`).

// --- Operation name values ---

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";

/// Explicit memory persistence.
pub const OP_REMEMBER: &str = "remember";

/// Similarity retrieval from long-term memory.
pub const OP_RECALL: &str = "recall";

// --- Provider name values ---

/// OpenAI provider identifier.
pub const PROVIDER_OPENAI: &str = "openai";
