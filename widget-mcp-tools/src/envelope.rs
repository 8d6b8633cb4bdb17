//! Uniform response wrapper returned by every tool call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub content: Vec<Content>,
}

impl ResponseEnvelope {
    /// Wrap a serializable payload as a single text entry holding its JSON.
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            content: vec![Content::Text {
                text: serde_json::to_string(payload)?,
            }],
        })
    }

    /// Text of the first entry, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|c| match c {
            Content::Text { text } => Some(text.as_str()),
        })
    }

    /// Parse the first text entry back into JSON.
    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(self.text().unwrap_or("null"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let envelope = ResponseEnvelope::json(&json!({"path": "a.txt"})).unwrap();
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            wire,
            json!({"content": [{"type": "text", "text": "{\"path\":\"a.txt\"}"}]})
        );
    }

    #[test]
    fn test_payload() {
        let envelope = ResponseEnvelope::json(&json!({"size": 3})).unwrap();
        assert_eq!(envelope.payload().unwrap()["size"], 3);

        let empty = ResponseEnvelope { content: vec![] };
        assert_eq!(empty.payload().unwrap(), Value::Null);
    }
}
