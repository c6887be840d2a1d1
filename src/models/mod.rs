use serde::{Deserialize, Serialize};

/// generateContent request body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentRequest {
    /// Single-turn request: one instruction followed by one inline image.
    pub fn with_image(prompt: &str, mime_type: &str, base64_data: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64_data,
                        },
                    },
                ],
            }],
        }
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a generateContent
/// response. Returns `None` if any step is missing or the text is not a string.
pub fn extract_candidate_text(response: &serde_json::Value) -> Option<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(serde_json::Value::as_str)
}

/// `POST /upload` success body. Also carries estimation errors as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaloriesResponse {
    pub calories: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
