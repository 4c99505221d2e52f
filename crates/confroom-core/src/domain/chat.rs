//! Chat message value type.

use serde::{Deserialize, Serialize};

/// One chat message. A message without text deserializes with an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub text: String,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_defaults_to_empty() {
        let msg: ChatMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg.text, "");
    }
}
