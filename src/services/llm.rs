use anyhow::{Result, bail};
use serde_json::json;

/// Client for the remote text-generation endpoint. The endpoint is a loose
/// collaborator: it may return the completion under any of several keys, or
/// as a plain text body.
pub struct GenClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

// Keys the upstream has been observed to use for the completion string.
const COMPLETION_KEYS: [&str; 4] = ["script", "result", "scenario", "content"];

impl GenClient {
    pub fn new() -> Result<Self> {
        let api_key = std::env::var("GEN_API_KEY").unwrap_or_else(|_| "dummy_key".to_string()); // In production, make this required
        let api_url = std::env::var("GEN_API_URL")
            .unwrap_or_else(|_| "http://localhost:11434/api/generate".to_string()); // Using Ollama as default

        Ok(GenClient {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        })
    }

    /// Request a completion for `prompt` and return the raw text, whatever
    /// shape the upstream wrapped it in.
    pub async fn generate(&self, user_id: &str, prompt: &str) -> Result<String> {
        let mut request_builder = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&json!({
                "user_id": user_id,
                "prompt": prompt,
            }));

        if self.api_key != "dummy_key" {
            request_builder =
                request_builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request_builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            bail!("generation endpoint returned {status}: {body}");
        }

        Ok(extract_completion(&body))
    }
}

// Accept {"script": "..."} / {"result": "..."} / ... or a plain text body.
fn extract_completion(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in COMPLETION_KEYS {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
        if let Some(text) = value.as_str() {
            return text.to_string();
        }
    }
    body.to_string()
}
