//! Parsing and validation of the model's response text.
//!
//! The model's output is untrusted: it may arrive wrapped in a fenced
//! code block, be truncated, or violate the slide schema entirely. None
//! of that is retried; a parse failure surfaces as [`Error::Format`] and
//! the caller decides what to show the user.

use serde::Deserialize;
use slidesmith_core::{Error, Presentation, Result};

#[derive(Deserialize)]
struct ResponseEnvelope {
    presentation: Presentation,
}

/// Parse raw model text into a [`Presentation`]. All-or-nothing: a deck
/// is either fully valid or the whole attempt fails.
pub fn parse_presentation_response(raw: &str) -> Result<Presentation> {
    let body = strip_code_fence(raw);

    let envelope: ResponseEnvelope = serde_json::from_str(body).map_err(|e| {
        Error::Format(format!("generation output is not a valid presentation: {}", e))
    })?;

    let presentation = envelope.presentation;
    if presentation.slides.is_empty() {
        return Err(Error::Format(
            "generation output contained no slides".to_string(),
        ));
    }

    log::debug!(
        "parsed presentation '{}' with {} slides",
        presentation.title,
        presentation.slides.len()
    );
    Ok(presentation)
}

/// Remove one fenced code-block wrapper if the model echoed one.
///
/// Recognizes ```` ```json ... ``` ```` and bare ```` ``` ... ``` ````
/// fences around the whole payload; anything else passes through.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    for fence in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(fence) {
            if let Some(inner) = rest.strip_suffix("```") {
                return inner.trim();
            }
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "presentation": {
            "title": "Deck",
            "slides": [
                { "type": "title", "title": "Deck", "subtitle": "sub" },
                { "type": "end", "title": "Thanks", "cta": "Go" }
            ]
        }
    }"#;

    #[test]
    fn test_bare_json_parses() {
        let deck = parse_presentation_response(MINIMAL).unwrap();
        assert_eq!(deck.title, "Deck");
        assert_eq!(deck.slides.len(), 2);
    }

    #[test]
    fn test_json_fence_is_stripped() {
        let wrapped = format!("```json\n{}\n```", MINIMAL);
        let deck = parse_presentation_response(&wrapped).unwrap();
        assert_eq!(deck.slides.len(), 2);
    }

    #[test]
    fn test_bare_fence_is_stripped() {
        let wrapped = format!("```\n{}\n```", MINIMAL);
        let deck = parse_presentation_response(&wrapped).unwrap();
        assert_eq!(deck.slides.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_a_format_error() {
        let err = parse_presentation_response("I couldn't do that, sorry.").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_schema_violation_is_a_format_error() {
        let raw = r#"{ "presentation": { "title": "Deck", "slides": [ { "type": "hologram" } ] } }"#;
        let err = parse_presentation_response(raw).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_missing_envelope_is_a_format_error() {
        let raw = r#"{ "title": "Deck", "slides": [] }"#;
        let err = parse_presentation_response(raw).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_empty_slide_list_is_rejected() {
        let raw = r#"{ "presentation": { "title": "Deck", "slides": [] } }"#;
        let err = parse_presentation_response(raw).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
