pub mod cleaning;
pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod prompts;
