//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{AnalysisService, PromptService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, InputReader, RealFileSystem, RealInputReader};

/// Container holding settings and I/O implementations; builds services on demand.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Stdin abstraction
    pub input: Arc<dyn InputReader>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(RealInputReader))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        input: Arc<dyn InputReader>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            input,
        }
    }

    pub fn analysis_service(&self) -> AnalysisService {
        AnalysisService::new(self.fs.clone(), self.input.clone(), &self.settings)
    }

    pub fn prompt_service(&self) -> PromptService {
        PromptService::new()
    }
}
