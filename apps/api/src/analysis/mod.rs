// The AI-augmented recommendation core.
// Implements: prompt building, gateway orchestration, response extraction,
// fallback content, and the single-flight recommendation cache.
// All model calls go through the gemini module; no direct HTTP here.

pub mod cache;
pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
pub mod service;
