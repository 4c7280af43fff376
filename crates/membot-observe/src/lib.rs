//! Observability for membot: tracing subscriber setup and OTel GenAI
//! semantic convention constants.

pub mod genai_attrs;
pub mod tracing_setup;
