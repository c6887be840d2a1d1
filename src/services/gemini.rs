use base64::{engine::general_purpose, Engine};
use std::path::Path;

use super::estimator::{self, CalorieEstimator, UNEXPECTED_FORMAT};
use crate::config::GeminiConfig;
use crate::models::{extract_candidate_text, GenerateContentRequest};

pub const CALORIE_PROMPT: &str = "Estimate the number of calories in this food image.";

/// Google Gemini generateContent client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn estimate_calories(&self, image_path: &Path) -> String {
        log::debug!("📸 Starting calorie estimation for: {}", image_path.display());

        let image_data = match tokio::fs::read(image_path).await {
            Ok(data) => data,
            Err(e) => {
                log::error!("❌ Failed to read image {}: {}", image_path.display(), e);
                return estimator::read_error(&e);
            }
        };
        let base64_image = general_purpose::STANDARD.encode(&image_data);
        let mime_type = mime_type_for(image_path);

        log::debug!("📊 Image file size: {} bytes", image_data.len());
        log::debug!("🔄 Base64 encoded size: {} bytes ({})", base64_image.len(), mime_type);

        let request = GenerateContentRequest::with_image(CALORIE_PROMPT, mime_type, base64_image);

        log::info!("🤖 Sending request to Gemini with model: {}", self.config.model);

        // The endpoint URL carries the API key, strip it from any transport error.
        let response = match self
            .client
            .post(self.config.endpoint_url())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let e = e.without_url();
                log::error!("❌ Gemini request failed: {}", e);
                return estimator::transport_error(&e);
            }
        };

        let status = response.status().as_u16();
        log::debug!("📥 Gemini response status: {}", status);

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let e = e.without_url();
                log::error!("❌ Failed to read Gemini response body: {}", e);
                return estimator::transport_error(&e);
            }
        };

        interpret_response(status, &body)
    }
}

#[async_trait::async_trait]
impl CalorieEstimator for GeminiClient {
    async fn estimate(&self, image_path: &Path) -> String {
        self.estimate_calories(image_path).await
    }
}

/// Map a raw generateContent response to the estimation result string.
fn interpret_response(status: u16, body: &str) -> String {
    if status != 200 {
        log::error!("❌ Gemini API error response ({}): {}", status, body);
        return estimator::status_error(status, body);
    }

    let parsed: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("⚠️ Gemini returned non-JSON body: {}", e);
            return UNEXPECTED_FORMAT.to_string();
        }
    };

    match extract_candidate_text(&parsed) {
        Some(text) => {
            log::info!("💬 Gemini response content: {}", text);
            text.to_string()
        }
        None => {
            log::warn!("⚠️ Unexpected Gemini response shape: {}", body);
            UNEXPECTED_FORMAT.to_string()
        }
    }
}

/// Guess the MIME type from the file extension, defaulting to JPEG.
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "image/jpeg",
    }
}
