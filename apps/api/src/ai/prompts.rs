//! Cross-cutting prompt fragments shared by every AI caller.
//!
//! Domain-specific prompts live next to the service that owns them; this
//! module only holds the pieces reused across services.

/// System prompt for calls that must return machine-readable JSON.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
You MUST respond with valid JSON only. No markdown, no code fences, no \
explanation, no text before or after the JSON.";
