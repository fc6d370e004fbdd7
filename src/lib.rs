//! rectree: build recursion-study prompts for a language model and split its
//! answers into labeled sections plus a validated recursion tree.
//!
//! The core lives in [`domain`]: [`domain::build_prompt`] and
//! [`domain::split_response`] are pure functions. The remaining modules add
//! configuration, I/O boundaries, terminal rendering and the `rectree` CLI.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{
    build_prompt, split_response, ParsedResponse, PromptMode, SectionMarker, TreeNode, TreeOutcome,
};
