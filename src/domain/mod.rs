//! Domain layer: prompt building, answer splitting and tree decoding
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod envelope;
pub mod error;
pub mod prompt;
pub mod section;
pub mod splitter;
pub mod tree;

pub use error::{DomainError, TreeError};
pub use prompt::{build_prompt, PromptMode};
pub use section::{Section, SectionMarker, NO_CONTENT};
pub use splitter::{split_response, split_response_with, ParsedResponse, ResponseSplitter};
pub use tree::{TreeLimits, TreeNode, TreeOutcome, PLACEHOLDER_NAME};
