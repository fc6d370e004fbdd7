//! Presentation of parsed answers for the terminal
//!
//! Label truncation happens here and only here; the decoded tree keeps the
//! names exactly as the model produced them.

use colored::Colorize;
use termtree::Tree;

use crate::config::Settings;
use crate::domain::{ParsedResponse, SectionMarker, TreeNode, TreeOutcome, PLACEHOLDER_NAME};

const ELLIPSIS: &str = "...";

pub const NO_TREE: &str = "No recursion tree data available.";

/// Shorten `name` to at most `max_len` characters for display.
///
/// Longer names keep their first `max_len - 3` characters followed by `...`.
pub fn display_label(name: &str, max_len: usize) -> String {
    if name.is_empty() {
        return PLACEHOLDER_NAME.to_string();
    }
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let kept: String = name
        .chars()
        .take(max_len.saturating_sub(ELLIPSIS.len()))
        .collect();
    format!("{kept}{ELLIPSIS}")
}

pub trait TreeNodeConvert {
    fn to_termtree(&self, max_len: usize) -> Tree<String>;
}

impl TreeNodeConvert for TreeNode {
    fn to_termtree(&self, max_len: usize) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|c| c.to_termtree(max_len))
            .collect();

        Tree::new(display_label(&self.name, max_len)).with_leaves(leaves)
    }
}

/// One-line statistics for a decoded tree.
pub fn tree_summary(root: &TreeNode) -> String {
    format!(
        "depth: {}, calls: {}, base cases: {}",
        root.depth(),
        root.node_count(),
        root.leaf_names().len()
    )
}

/// Body text for the tree section.
pub fn render_tree_outcome(outcome: &TreeOutcome, settings: &Settings) -> String {
    match outcome {
        TreeOutcome::Valid { root } => format!(
            "{}\n{}",
            root.to_termtree(settings.label_max_len).to_string().trim_end(),
            tree_summary(root).dimmed()
        ),
        TreeOutcome::Absent => NO_TREE.to_string(),
        TreeOutcome::Invalid { error } => {
            format!("{}: {}", "Recursion tree could not be parsed".yellow(), error)
        }
    }
}

/// All four sections in fixed order, each under a colored heading.
pub fn render_report(parsed: &ParsedResponse, settings: &Settings) -> String {
    let mut out = String::new();
    for section in &parsed.sections {
        out.push_str(&section.marker.to_string().cyan().bold().to_string());
        out.push('\n');
        if section.marker == SectionMarker::TreeJson {
            out.push_str(&render_tree_outcome(&parsed.tree, settings));
        } else {
            out.push_str(section.content.trim());
        }
        out.push_str("\n\n");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}
