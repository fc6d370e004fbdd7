//! Response splitter: partitions a model answer into its four sections and
//! extracts the recursion tree from the first fenced JSON block.

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::domain::section::{Section, SectionMarker};
use crate::domain::tree::{TreeLimits, TreeNode, TreeOutcome};

/// Opening fence of a JSON code block.
const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Structured view of one model answer. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedResponse {
    /// One entry per marker, in [`SectionMarker::ALL`] order
    pub sections: Vec<Section>,
    pub tree: TreeOutcome,
}

impl ParsedResponse {
    pub fn section(&self, marker: SectionMarker) -> &Section {
        &self.sections[marker.position()]
    }

    pub fn content(&self, marker: SectionMarker) -> &str {
        &self.section(marker).content
    }

    /// Markers that did not occur in the answer.
    pub fn missing_markers(&self) -> Vec<SectionMarker> {
        self.sections
            .iter()
            .filter(|s| !s.found)
            .map(|s| s.marker)
            .collect()
    }
}

/// Splits raw model answers. Holds the compiled fence pattern and decoding limits.
#[derive(Debug, Clone)]
pub struct ResponseSplitter {
    fence_regex: Regex,
    limits: TreeLimits,
}

impl Default for ResponseSplitter {
    fn default() -> Self {
        Self::new(TreeLimits::default())
    }
}

impl ResponseSplitter {
    pub fn new(limits: TreeLimits) -> Self {
        Self {
            // Lazy body: stops at the first closing fence.
            fence_regex: Regex::new(r"(?s)```json(.*?)```").expect("fence pattern is valid"),
            limits,
        }
    }

    pub fn limits(&self) -> &TreeLimits {
        &self.limits
    }

    /// Split `raw` into sections and a tree outcome. Never fails.
    #[instrument(level = "debug", skip(self, raw), fields(len = raw.len()))]
    pub fn split(&self, raw: &str) -> ParsedResponse {
        let sections = extract_sections(raw);
        let tree = self.extract_tree(raw);
        debug!(
            "split: {} of {} markers found, tree absent={}, invalid={}",
            sections.iter().filter(|s| s.found).count(),
            sections.len(),
            tree.is_absent(),
            tree.is_invalid()
        );
        ParsedResponse { sections, tree }
    }

    /// Locate the first ```` ```json ```` block and decode it.
    pub fn extract_tree(&self, raw: &str) -> TreeOutcome {
        let Some(body) = self
            .fence_regex
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
        else {
            return TreeOutcome::Absent;
        };

        match TreeNode::from_json_str(body, &self.limits) {
            Ok(root) => TreeOutcome::Valid { root },
            Err(error) => {
                warn!("recursion tree rejected: {}", error);
                TreeOutcome::Invalid { error }
            }
        }
    }
}

/// Split with default tree limits.
pub fn split_response(raw: &str) -> ParsedResponse {
    ResponseSplitter::default().split(raw)
}

/// Split with explicit tree limits.
pub fn split_response_with(raw: &str, limits: &TreeLimits) -> ParsedResponse {
    ResponseSplitter::new(*limits).split(raw)
}

/// Ordered scan over marker positions.
///
/// A section runs from the end of its marker to the earliest later-ordered
/// marker found after it, or to the end of text. A marker glyph repeated in
/// prose therefore cuts the preceding section short.
fn extract_sections(raw: &str) -> Vec<Section> {
    SectionMarker::ALL
        .iter()
        .map(|&marker| {
            let Some(pos) = raw.find(marker.glyph()) else {
                return Section::missing(marker);
            };
            let start = pos + marker.glyph().len();
            let end = marker
                .successors()
                .iter()
                .filter_map(|next| raw[start..].find(next.glyph()).map(|i| start + i))
                .min()
                .unwrap_or(raw.len());

            let span = &raw[start..end];
            let content = if marker == SectionMarker::TreeJson {
                strip_tree_fences(span)
            } else {
                span.to_string()
            };

            Section {
                marker,
                content,
                found: true,
            }
        })
        .collect()
}

/// Remove a leading ```` ```json ```` opener and a trailing fence, if present.
fn strip_tree_fences(span: &str) -> String {
    let mut body = span;
    if let Some(rest) = body.trim_start().strip_prefix(JSON_FENCE) {
        body = rest.trim_start();
    }
    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest.trim_end();
    }
    body.to_string()
}
