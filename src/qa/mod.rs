// src/qa/mod.rs
// =============================================================================
// This module forwards questions about scraped content to a hosted
// chat-completion endpoint (Groq's OpenAI-compatible API).
//
// Submodules:
// - prompt: Builds the system/user messages and clamps oversized content
// - client: Owns the HTTP client, API key and sampling parameters
//
// Design note: the client is an explicitly constructed value that gets
// passed around. There is no process-global API key or client state; the
// key is read once at startup and moved into QaConfig.
// =============================================================================

mod client;
mod prompt;

pub use client::{QaClient, QaConfig, MISSING_CONTENT_ERROR};
pub use prompt::{build_user_message, clamp_content, SYSTEM_PROMPT};
