use serde::{Deserialize, Serialize};

/// A single conversation turn: a role plus one or more parts.
///
/// Roles follow the Gemini convention: `"user"`, `"model"`, and `"function"`
/// for tool results fed back into the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FunctionCall {
        name: String,
        args: serde_json::Value,
    },
    FunctionResponse {
        name: String,
        response: serde_json::Value,
    },
}

impl Content {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), parts: Vec::new() }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text { text: text.into() });
        self
    }

    /// Concatenated text of all [`Part::Text`] parts.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            if let Part::Text { text } = part {
                out.push_str(text);
            }
        }
        out
    }

    /// True if any part is a function call.
    pub fn has_function_calls(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, Part::FunctionCall { .. }))
    }

    /// All function calls contained in this content, in order.
    pub fn function_calls(&self) -> Vec<(String, serde_json::Value)> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::FunctionCall { name, args } => Some((name.clone(), args.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Part {
    /// Returns the text if this is a `Text` part, `None` otherwise.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_builder() {
        let content = Content::new("user").with_text("hello");
        assert_eq!(content.role, "user");
        assert_eq!(content.parts.len(), 1);
        assert_eq!(content.text(), "hello");
    }

    #[test]
    fn test_text_joins_fragments() {
        let mut content = Content::new("model").with_text("one ");
        content.parts.push(Part::Text { text: "two".to_string() });
        assert_eq!(content.text(), "one two");
    }

    #[test]
    fn test_function_calls() {
        let mut content = Content::new("model");
        content.parts.push(Part::FunctionCall {
            name: "calculator".to_string(),
            args: json!({"a": 1}),
        });
        assert!(content.has_function_calls());
        let calls = content.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "calculator");
    }

    #[test]
    fn test_part_roundtrip() {
        let part = Part::FunctionResponse {
            name: "calculator".to_string(),
            response: json!({"result": 4}),
        };
        let text = serde_json::to_string(&part).unwrap();
        let back: Part = serde_json::from_str(&text).unwrap();
        assert_eq!(part, back);
    }
}
