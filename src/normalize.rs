//! Normalization of provider payloads into displayable values.
//!
//! Everything here is a pure function over already-fetched data. Callers
//! decide how the resulting strings map onto success or degraded outcomes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::providers::gemini::types::GenerateContentResponse;

/// Placeholder reply when a completion carries no usable text.
pub const NO_RESPONSE: &str = "No response.";

/// Pulls the first candidate's first text part out of a Gemini response.
///
/// Missing candidates, missing content, missing parts, or an empty text
/// string all collapse to [`NO_RESPONSE`] rather than an error.
pub fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_RESPONSE)
        .to_owned()
}

/// Encodes raw image bytes as a `data:image/png;base64,` URL.
pub fn png_data_url(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

/// Percent-encodes SVG markup as a `data:image/svg+xml;utf8,` URL.
pub fn svg_data_url(svg: &str) -> String {
    format!("data:image/svg+xml;utf8,{}", urlencoding::encode(svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_from(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response = response_from(json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other candidate"}]}}
            ]
        }));
        assert_eq!(extract_text(&response), "first");
    }

    #[test]
    fn missing_candidates_yield_placeholder() {
        let response = response_from(json!({}));
        assert_eq!(extract_text(&response), NO_RESPONSE);
    }

    #[test]
    fn empty_text_yields_placeholder() {
        let response = response_from(json!({
            "candidates": [{"content": {"parts": [{"text": ""}]}}]
        }));
        assert_eq!(extract_text(&response), NO_RESPONSE);
    }

    #[test]
    fn extraction_is_idempotent() {
        let response = response_from(json!({
            "candidates": [{"content": {"parts": [{"text": "stable"}]}}]
        }));
        assert_eq!(extract_text(&response), extract_text(&response));
    }

    #[test]
    fn png_bytes_become_base64_data_url() {
        assert_eq!(png_data_url(&[1, 2, 3]), "data:image/png;base64,AQID");
    }

    #[test]
    fn svg_markup_is_percent_encoded() {
        let url = svg_data_url("<svg a=\"b\"></svg>");
        assert!(url.starts_with("data:image/svg+xml;utf8,"));
        assert!(url.contains("%3Csvg"));
        assert!(!url.contains('<'));
    }
}
