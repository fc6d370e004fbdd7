//! Answer analysis service
//!
//! Reads a model answer, optionally unwraps the API response envelope, and
//! splits it into sections and a recursion tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::envelope::extract_answer_str;
use crate::domain::{ParsedResponse, ResponseSplitter};
use crate::infrastructure::traits::{FileSystem, InputReader};

/// Where to read text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `None` and `-` mean stdin.
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p != Path::new("-") => InputSource::File(p.to_path_buf()),
            _ => InputSource::Stdin,
        }
    }
}

/// Service for turning raw model output into a [`ParsedResponse`].
pub struct AnalysisService {
    fs: Arc<dyn FileSystem>,
    input: Arc<dyn InputReader>,
    splitter: ResponseSplitter,
}

impl AnalysisService {
    pub fn new(fs: Arc<dyn FileSystem>, input: Arc<dyn InputReader>, settings: &Settings) -> Self {
        Self {
            fs,
            input,
            splitter: ResponseSplitter::new(settings.tree_limits()),
        }
    }

    /// Read the whole input.
    pub fn load(&self, source: &InputSource) -> ApplicationResult<String> {
        match source {
            InputSource::Stdin => {
                debug!("load: reading stdin");
                self.input.read_stdin().with_context("read stdin")
            }
            InputSource::File(path) => {
                debug!("load: path={}", path.display());
                if !self.fs.is_file(path) {
                    return Err(ApplicationError::InputNotFound(path.clone()));
                }
                self.fs
                    .read_to_string(path)
                    .with_path_context("read input", path)
            }
        }
    }

    /// Split `raw`. With `envelope`, `raw` is a `generateContent` response body
    /// and the answer text is taken from its first candidate.
    pub fn analyze(&self, raw: &str, envelope: bool) -> ApplicationResult<ParsedResponse> {
        let answer = if envelope {
            extract_answer_str(raw)?
        } else {
            raw.to_string()
        };
        if answer.trim().is_empty() {
            return Err(ApplicationError::EmptyInput("model answer".to_string()));
        }
        Ok(self.splitter.split(&answer))
    }

    /// [`load`](Self::load) followed by [`analyze`](Self::analyze).
    pub fn analyze_source(
        &self,
        source: &InputSource,
        envelope: bool,
    ) -> ApplicationResult<ParsedResponse> {
        let raw = self.load(source)?;
        self.analyze(&raw, envelope)
    }
}
