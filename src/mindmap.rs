//! Mind map synthesis: prompts the text model for a JSON node/edge graph
//! and validates what comes back.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::AiError;
use crate::providers::gemini::GeminiClient;
use crate::types::Prompt;

/// Instruction template sent to the text model. `{topic}` markers are
/// replaced with the requested topic.
const PROMPT_TEMPLATE: &str = r#"Create a well-structured mind map for: "{topic}"

Generate ONLY a JSON object with this EXACT structure (no markdown, no explanation):

{
  "nodes": [
    {"id": "node-1", "type": "topicNode", "data": {"label": "{topic}", "description": "Central Topic"}, "position": {"x": 0, "y": 0}},
    {"id": "node-2", "type": "ideaNode", "data": {"label": "Concept 1", "description": "Description"}, "position": {"x": 0, "y": 0}},
    {"id": "node-3", "type": "ideaNode", "data": {"label": "Concept 2", "description": "Description"}, "position": {"x": 0, "y": 0}},
    {"id": "node-4", "type": "ideaNode", "data": {"label": "Concept 3", "description": "Description"}, "position": {"x": 0, "y": 0}},
    {"id": "node-5", "type": "processNode", "data": {"label": "Process", "description": "How it works"}, "position": {"x": 0, "y": 0}},
    {"id": "node-6", "type": "ideaNode", "data": {"label": "Sub-concept", "description": "Detail"}, "position": {"x": 0, "y": 0}},
    {"id": "node-7", "type": "ideaNode", "data": {"label": "Sub-concept", "description": "Detail"}, "position": {"x": 0, "y": 0}}
  ],
  "edges": [
    {"id": "e1-2", "source": "node-1", "target": "node-2"},
    {"id": "e1-3", "source": "node-1", "target": "node-3"},
    {"id": "e1-4", "source": "node-1", "target": "node-4"},
    {"id": "e1-5", "source": "node-1", "target": "node-5"},
    {"id": "e2-6", "source": "node-2", "target": "node-6"},
    {"id": "e3-7", "source": "node-3", "target": "node-7"}
  ]
}

RULES:
1. Create 8-12 nodes total
2. Node 1 = topicNode with main topic
3. Nodes 2-5 = main branches from center (use ideaNode or processNode)
4. Nodes 6-12 = sub-branches from main nodes
5. Create edges from center to main branches AND from main branches to sub-branches
6. Use node types: topicNode (center only), ideaNode (most nodes), processNode (methods/steps), decisionNode (choices)
7. Labels: 2-4 words max
8. Descriptions: 5-10 words
9. Position values don't matter (will be auto-arranged)
10. Return ONLY the JSON object, no markdown code blocks, no extra text"#;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap());
static BARE_JSON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Builds a mind map for `topic` by prompting the text model for JSON.
///
/// The reply is mined for a JSON object, which is then parsed and checked
/// for the `nodes` and `edges` keys the graph renderer expects. Model and
/// transport failures pass through unchanged.
pub async fn generate(client: &GeminiClient, topic: &str) -> Result<Value, AiError> {
    let prompt = Prompt::new(build_prompt(topic))?;
    let reply = client.generate_once(&prompt).await?;

    let json_text = extract_json(&reply)
        .ok_or_else(|| AiError::ProviderError("No JSON found in response".to_string()))?;
    let value: Value = serde_json::from_str(json_text)
        .map_err(|error| AiError::ProviderError(format!("Invalid JSON response from AI: {error}")))?;

    if value.get("nodes").is_none() || value.get("edges").is_none() {
        return Err(AiError::ProviderError(
            "Invalid mind map structure".to_string(),
        ));
    }
    Ok(value)
}

fn build_prompt(topic: &str) -> String {
    PROMPT_TEMPLATE.replace("{topic}", topic)
}

/// Pulls a JSON object out of a model reply. Fenced code blocks win over a
/// bare brace span.
fn extract_json(reply: &str) -> Option<&str> {
    if let Some(captures) = FENCED_JSON.captures(reply) {
        return captures.get(1).map(|found| found.as_str());
    }
    BARE_JSON.find(reply).map(|found| found.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_the_topic_twice() {
        let prompt = build_prompt("Compilers");
        assert!(prompt.starts_with("Create a well-structured mind map for: \"Compilers\""));
        assert!(prompt.contains("\"label\": \"Compilers\""));
    }

    #[test]
    fn fenced_json_wins_over_bare_braces() {
        let reply = "intro ```json\n{\"a\": 1}\n``` trailing {\"b\": 2}";
        assert_eq!(extract_json(reply), Some("{\"a\": 1}"));
    }

    #[test]
    fn unfenced_replies_fall_back_to_the_brace_span() {
        let reply = "Sure! { \"nodes\": [] } done";
        assert_eq!(extract_json(reply), Some("{ \"nodes\": [] }"));
    }

    #[test]
    fn fence_label_is_optional() {
        let reply = "```\n{\"nodes\": []}\n```";
        assert_eq!(extract_json(reply), Some("{\"nodes\": []}"));
    }

    #[test]
    fn replies_without_json_are_rejected() {
        assert_eq!(extract_json("no structure here"), None);
    }
}
