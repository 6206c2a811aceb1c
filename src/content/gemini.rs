use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::{
    config::ContentSettings,
    content::{badge_prompt, congratulation_prompt, ContentGenerator, LOGO_PROMPT},
    models::{BadgeTier, ImpressionError, Result},
};

/// `generateContent` client for the Gemini REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    text_model: String,
    image_model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    fn text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }

    fn image_data_uri(&self) -> Option<String> {
        self.parts()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| format!("data:{};base64,{}", d.mime_type, d.data))
    }
}

impl GeminiClient {
    pub fn new(settings: &ContentSettings, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key,
            text_model: settings.text_model.clone(),
            image_model: settings.image_model.clone(),
        })
    }

    fn text_request(prompt: String) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt),
                    inline_data: None,
                }],
            }],
            generation_config: None,
        }
    }

    fn image_request(prompt: String) -> GenerateRequest {
        GenerateRequest {
            generation_config: Some(GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                },
            }),
            ..Self::text_request(prompt)
        }
    }

    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, model);
        debug!("Requesting content from {}", model);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImpressionError::GenerationError(format!(
                "{} returned {}: {}",
                model,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        Ok(response.json().await?)
    }

    async fn image(&self, prompt: String) -> Result<Option<String>> {
        let response = self.generate(&self.image_model, &Self::image_request(prompt)).await?;
        Ok(response.image_data_uri())
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn congratulation(&self, name: &str, rank: u32, score: f64) -> Result<String> {
        let request = Self::text_request(congratulation_prompt(name, rank, score));
        let response = self.generate(&self.text_model, &request).await?;
        Ok(response.text())
    }

    async fn badge_image(&self, tier: BadgeTier, name: &str, rank: u32) -> Result<Option<String>> {
        self.image(badge_prompt(tier, name, rank)).await
    }

    async fn app_logo(&self) -> Result<Option<String>> {
        self.image(LOGO_PROMPT.to_string()).await
    }
}
