//! Last-resort handling when image generation fails outright.

use crate::error::AiError;
use crate::normalize;
use crate::types::{GenerationResult, Prompt};

/// Resolves a failed art request.
///
/// With the placeholder enabled the error is swallowed and a synthesized
/// SVG carrying the prompt and the failure reason is served instead; the
/// caller still learns the outcome through the [`GenerationResult::Degraded`]
/// variant. Otherwise the error passes through untouched.
pub fn on_image_failure(
    prompt: &Prompt,
    error: AiError,
    placeholder_enabled: bool,
) -> GenerationResult {
    if placeholder_enabled {
        tracing::warn!(error = %error, "image generation failed, serving placeholder");
        GenerationResult::Degraded(placeholder_data_url(prompt.as_str(), &error.to_string()))
    } else {
        GenerationResult::Err(error)
    }
}

/// 768x480 gradient SVG with the prompt and failure reason rendered as
/// centered text, percent-encoded as a data URL.
pub fn placeholder_data_url(prompt: &str, reason: &str) -> String {
    let prompt = escape_markup(prompt);
    let reason = escape_markup(reason);
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='768' height='480'>\
         <defs><linearGradient id='g' x1='0' x2='1' y1='0' y2='1'>\
         <stop offset='0%' stop-color='#111827'/>\
         <stop offset='100%' stop-color='#1f2937'/>\
         </linearGradient></defs>\
         <rect width='100%' height='100%' fill='url(#g)'/>\
         <text x='50%' y='45%' dominant-baseline='middle' text-anchor='middle' \
         fill='#e5e7eb' font-size='20' font-family='sans-serif'>{prompt}</text>\
         <text x='50%' y='60%' dominant-baseline='middle' text-anchor='middle' \
         fill='#9ca3af' font-size='14' font-family='sans-serif'>{reason}</text>\
         </svg>"
    );
    normalize::svg_data_url(&svg)
}

/// Angle brackets are the only markup-significant characters inside SVG
/// text nodes here.
fn escape_markup(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_without_placeholder_passes_the_error_through() {
        let prompt = Prompt::new("a dream").unwrap();
        let error = AiError::AllCandidatesFailed("nothing worked".to_string());
        assert_eq!(
            on_image_failure(&prompt, error.clone(), false),
            GenerationResult::Err(error)
        );
    }

    #[test]
    fn failure_with_placeholder_degrades_to_svg() {
        let prompt = Prompt::new("a dream").unwrap();
        let error = AiError::AllCandidatesFailed("nothing worked".to_string());
        let GenerationResult::Degraded(url) = on_image_failure(&prompt, error, true) else {
            panic!("expected degraded output");
        };
        assert!(url.starts_with("data:image/svg+xml;utf8,"));
        assert!(url.contains("a%20dream"));
        assert!(url.contains("nothing%20worked"));
    }

    #[test]
    fn angle_brackets_are_escaped_before_embedding() {
        let url = placeholder_data_url("<script>", "HTTP 500");
        assert!(url.contains("%26lt%3Bscript%26gt%3B"));
        assert!(url.contains("HTTP%20500"));
    }
}
