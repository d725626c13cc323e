//! Services layer - Business logic
//!
//! - Prompt building
//! - Text generation client
//! - Document export
//! - Markdown preview
//! - The contract pipeline tying them together

pub mod contract;
pub mod export;
pub mod generation;
pub mod markdown;
pub mod prompt;

pub use contract::ContractService;
pub use export::{ExportError, ExportWriter};
pub use generation::{OpenAiGenerator, ServiceError, TextGenerator};
pub use markdown::MarkdownRenderer;
pub use prompt::build_prompt;
