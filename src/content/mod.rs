pub mod generator;
pub mod gemini;
pub mod service;

pub use generator::{badge_prompt, congratulation_prompt, ContentGenerator, LOGO_PROMPT};
pub use gemini::GeminiClient;
pub use service::{ContentService, EMPTY_GREETING, FALLBACK_GREETING};

#[cfg(test)]
pub use generator::MockContentGenerator;
