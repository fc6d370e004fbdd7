//! Gemini `generateContent` request and response bodies.
//!
//! Only the JSON shapes are handled here; sending the request is left to the caller.

use serde_json::{json, Value};

use crate::domain::error::DomainError;

/// Request body carrying a single text part.
pub fn request_payload(prompt: &str) -> Value {
    json!({
        "contents": [
            { "parts": [ { "text": prompt } ] }
        ]
    })
}

/// Answer text at `candidates[0].content.parts[0].text`.
pub fn extract_answer(response: &Value) -> Result<String, DomainError> {
    if !response.is_object() {
        return Err(DomainError::InvalidEnvelope(
            "response body is not a JSON object".to_string(),
        ));
    }

    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(DomainError::NoAnswer)
}

/// Parse a response body and extract its answer.
pub fn extract_answer_str(body: &str) -> Result<String, DomainError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DomainError::InvalidEnvelope(e.to_string()))?;
    extract_answer(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_prompt_when_building_payload_then_wraps_in_contents() {
        let payload = request_payload("hello");
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn given_candidate_text_when_extracting_then_returns_it() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"1️⃣ answer"}],"role":"model"}}]}"#;
        assert_eq!(extract_answer_str(body).unwrap(), "1️⃣ answer");
    }

    #[test]
    fn given_no_candidates_when_extracting_then_no_answer() {
        assert_eq!(
            extract_answer_str(r#"{"candidates": []}"#),
            Err(DomainError::NoAnswer)
        );
        assert_eq!(
            extract_answer_str(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#),
            Err(DomainError::NoAnswer)
        );
    }

    #[test]
    fn given_non_json_body_when_extracting_then_invalid_envelope() {
        assert!(matches!(
            extract_answer_str("plain text"),
            Err(DomainError::InvalidEnvelope(_))
        ));
        assert!(matches!(
            extract_answer_str("[1]"),
            Err(DomainError::InvalidEnvelope(_))
        ));
    }
}
