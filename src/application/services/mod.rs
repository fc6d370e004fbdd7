//! Application services
//!
//! Services depend on I/O boundary traits (FileSystem, InputReader)
//! but are themselves concrete structs, not traits.

mod analysis;
mod prompt;

pub use analysis::{AnalysisService, InputSource};
pub use prompt::PromptService;
