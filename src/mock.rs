//! Canned responses served when mock mode is enabled.
//!
//! Every function here is deterministic and touches no network.

use serde_json::{Value, json};

use crate::normalize;

/// Echo reply for a chat message.
pub fn chat_reply(message: &str) -> String {
    format!("🤖 (mock) You said: {message}")
}

/// 512x320 black SVG labeled with the prompt, as a data URL.
pub fn art_data_url(prompt: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='512' height='320'>\
         <rect width='100%' height='100%' fill='black'/>\
         <text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' \
         fill='white' font-size='20' font-family='sans-serif'>Mock Art: {prompt}</text>\
         </svg>"
    );
    normalize::svg_data_url(&svg)
}

/// Small fixed mind map rooted at `topic`.
pub fn mindmap(topic: &str) -> Value {
    json!({
        "nodes": [
            {
                "id": "node-1",
                "type": "topicNode",
                "data": {"label": topic, "description": "Central Topic"},
                "position": {"x": 0, "y": 0}
            },
            {
                "id": "node-2",
                "type": "ideaNode",
                "data": {"label": "Key Idea", "description": "First branch"},
                "position": {"x": 0, "y": 0}
            },
            {
                "id": "node-3",
                "type": "ideaNode",
                "data": {"label": "Related Concept", "description": "Second branch"},
                "position": {"x": 0, "y": 0}
            },
            {
                "id": "node-4",
                "type": "processNode",
                "data": {"label": "Process", "description": "How it works"},
                "position": {"x": 0, "y": 0}
            },
            {
                "id": "node-5",
                "type": "ideaNode",
                "data": {"label": "Detail", "description": "Supporting detail"},
                "position": {"x": 0, "y": 0}
            }
        ],
        "edges": [
            {"id": "e1-2", "source": "node-1", "target": "node-2"},
            {"id": "e1-3", "source": "node-1", "target": "node-3"},
            {"id": "e1-4", "source": "node-1", "target": "node-4"},
            {"id": "e2-5", "source": "node-2", "target": "node-5"}
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_echoes_the_message() {
        assert_eq!(chat_reply("hello"), "🤖 (mock) You said: hello");
    }

    #[test]
    fn art_is_an_encoded_svg_data_url() {
        let url = art_data_url("neon fox");
        assert!(url.starts_with("data:image/svg+xml;utf8,"));
        assert!(url.contains("Mock%20Art%3A%20neon%20fox"));
    }

    #[test]
    fn mindmap_is_rooted_at_the_topic() {
        let map = mindmap("Rust");
        assert_eq!(map["nodes"][0]["type"], "topicNode");
        assert_eq!(map["nodes"][0]["data"]["label"], "Rust");
        assert!(map["nodes"].as_array().is_some_and(|nodes| nodes.len() > 1));
        assert!(map["edges"].as_array().is_some_and(|edges| !edges.is_empty()));
    }

    #[test]
    fn mindmap_is_deterministic() {
        assert_eq!(mindmap("Rust"), mindmap("Rust"));
    }
}
