//! Tests for the prompt builder and its marker contract with the splitter

use rstest::rstest;

use rectree::application::services::PromptService;
use rectree::application::ApplicationError;
use rectree::domain::{build_prompt, split_response, PromptMode, SectionMarker};

fn marker_positions(text: &str) -> Vec<usize> {
    SectionMarker::ALL
        .iter()
        .map(|m| {
            text.find(m.glyph())
                .unwrap_or_else(|| panic!("marker {:?} missing from prompt", m))
        })
        .collect()
}

#[rstest]
#[case(PromptMode::Question, "What is n!")]
#[case(PromptMode::Code, "function fib(n) { if (n <= 1) return n; return fib(n-1) + fib(n-2); }")]
fn given_mode_when_building_prompt_then_contains_markers_in_order_and_content(
    #[case] mode: PromptMode,
    #[case] content: &str,
) {
    let prompt = build_prompt(mode, content);

    let positions = marker_positions(&prompt);
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "markers out of order: {:?}",
        positions
    );
    assert!(prompt.contains(content));
    assert!(prompt.contains("```json"));
}

#[test]
fn given_content_with_markdown_when_building_prompt_then_embedded_verbatim() {
    let content = "  indented\n\n* bullet with `code` and \"quotes\"\n";

    let prompt = build_prompt(PromptMode::Question, content);

    assert!(prompt.contains(content));
}

#[test]
fn given_answer_following_prompt_headings_when_splitting_then_every_section_found() {
    // An answer that echoes the prompt's heading lines verbatim must split cleanly.
    let prompt = build_prompt(PromptMode::Code, "def f(n): return 1 if n < 2 else f(n-1) * n");
    let headings: Vec<&str> = prompt
        .lines()
        .filter(|line| SectionMarker::ALL.iter().any(|m| line.starts_with(m.glyph())))
        .collect();
    assert_eq!(headings.len(), 4);

    let answer = headings
        .iter()
        .map(|h| format!("{h}\nbody\n"))
        .collect::<String>();
    let parsed = split_response(&answer);

    assert!(parsed.missing_markers().is_empty());
    for section in &parsed.sections {
        assert!(section.content.contains("body"), "{:?}", section);
    }
}

#[test]
fn given_blank_content_when_preparing_prompt_then_rejected() {
    let service = PromptService::new();

    let result = service.prompt(PromptMode::Question, "   \n\t");

    assert!(matches!(result, Err(ApplicationError::EmptyInput(_))));
}

#[test]
fn given_content_when_preparing_payload_then_prompt_is_first_text_part() {
    let service = PromptService::new();

    let payload = service.payload(PromptMode::Code, "fn f() {}").unwrap();

    let text = payload["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert_eq!(text, build_prompt(PromptMode::Code, "fn f() {}"));
}
