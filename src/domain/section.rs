//! Section markers: the fixed headings that delimit a model answer

use std::fmt;

use serde::Serialize;

/// Text used for any section whose marker does not occur in the answer.
pub const NO_CONTENT: &str = "No content available.";

/// One of the four section headings requested from the model.
///
/// Declaration order is the logical order of the answer. The prompt builder
/// and the splitter both read [`SectionMarker::ALL`], so the glyphs emitted in
/// the prompt are exactly the ones searched for in the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMarker {
    Explanation,
    RecursiveSolution,
    TreeJson,
    Complexity,
}

impl SectionMarker {
    pub const ALL: [SectionMarker; 4] = [
        SectionMarker::Explanation,
        SectionMarker::RecursiveSolution,
        SectionMarker::TreeJson,
        SectionMarker::Complexity,
    ];

    /// Keycap emoji heading the section (digit, U+FE0F, U+20E3).
    pub fn glyph(self) -> &'static str {
        match self {
            SectionMarker::Explanation => "1\u{fe0f}\u{20e3}",
            SectionMarker::RecursiveSolution => "2\u{fe0f}\u{20e3}",
            SectionMarker::TreeJson => "3\u{fe0f}\u{20e3}",
            SectionMarker::Complexity => "4\u{fe0f}\u{20e3}",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            SectionMarker::Explanation => "Question/Code Explanation",
            SectionMarker::RecursiveSolution => "Recursive Solution Explanation",
            SectionMarker::TreeJson => "Recursion Tree (JSON)",
            SectionMarker::Complexity => "Time Complexity and Optimizations",
        }
    }

    /// Zero-based position in the fixed order.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Markers that follow this one in the fixed order.
    pub fn successors(self) -> &'static [SectionMarker] {
        &Self::ALL[self.position() + 1..]
    }
}

impl fmt::Display for SectionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph(), self.label())
    }
}

/// Extracted text of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub marker: SectionMarker,
    /// Section text, or [`NO_CONTENT`] when the marker was not found
    pub content: String,
    /// Whether the marker occurred in the answer
    pub found: bool,
}

impl Section {
    pub fn missing(marker: SectionMarker) -> Self {
        Self {
            marker,
            content: NO_CONTENT.to_string(),
            found: false,
        }
    }
}
