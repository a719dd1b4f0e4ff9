//! Minimal Gemini `generateContent` client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{api::client, prelude::*};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub struct Api {
    client: Client,
    api_key: String,
    model: String,
}

impl Api {
    pub fn try_new(api_key: String, model: String) -> Result<Self> {
        Ok(Self { client: client::try_new()?, api_key, model })
    }

    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn generate_content(&self, system_instruction: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model,
        );
        let request = GenerateContentRequest {
            system_instruction: Content::from_text(system_instruction),
            contents: vec![Content::from_text(prompt)],
        };
        info!("generating…");
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("failed to send the request")?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await
            .context("failed to decode the response")?;
        response.into_text().context("no content found in the response")
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn from_text(text: &str) -> Self {
        Self { parts: vec![Part { text: Some(text.to_string()) }] }
    }
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}
