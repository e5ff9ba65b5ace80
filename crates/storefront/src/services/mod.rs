//! External service clients and their policy wrappers.

pub mod gemini;
pub mod insight;

pub use gemini::{GeminiClient, GeminiError, GenerativeProvider};
pub use insight::{EMPTY_FALLBACK, InsightService, UNAVAILABLE_FALLBACK};
