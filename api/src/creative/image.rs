use super::{ensure_success, mock, MOCK_PROVIDER};
use crate::error::{ApiError, ApiResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use casavida_core::config::ImageProviderConfig;
use serde::Deserialize;
use serde_json::json;

const PROVIDER: &str = "openai";

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub provider: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ImageClient {
    http: reqwest::Client,
    config: ImageProviderConfig,
}

#[derive(Deserialize)]
struct ImagesResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, config: ImageProviderConfig) -> Self {
        Self { http, config }
    }

    pub fn is_live(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub async fn generate(&self, prompt: &str) -> ApiResult<GeneratedImage> {
        if prompt.trim().is_empty() {
            return Err(ApiError::validation("prompt must not be empty"));
        }
        let Some(key) = self.config.api_key.as_deref() else {
            log::warn!("creative: no image provider key, using placeholder image");
            return Ok(GeneratedImage {
                provider: MOCK_PROVIDER,
                content_type: mock::PLACEHOLDER_CONTENT_TYPE,
                bytes: mock::placeholder_image(prompt).into_bytes(),
            });
        };

        let url = format!(
            "{}/images/generations",
            self.config.base_url.trim_end_matches('/')
        );
        let body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "size": self.config.size,
            "n": 1,
            "response_format": "b64_json",
        });
        let response = self.http.post(url).bearer_auth(key).json(&body).send().await?;
        let parsed: ImagesResponse = ensure_success(PROVIDER, response).await?.json().await?;

        let encoded = parsed
            .data
            .into_iter()
            .find_map(|d| d.b64_json)
            .ok_or_else(|| ApiError::ProviderPayload {
                provider: PROVIDER,
                detail: "no b64_json image in response".into(),
            })?;
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| ApiError::ProviderPayload {
                provider: PROVIDER,
                detail: format!("invalid base64 image: {e}"),
            })?;
        log::info!("creative: {} byte image from {PROVIDER}", bytes.len());
        Ok(GeneratedImage {
            provider: PROVIDER,
            content_type: "image/png",
            bytes,
        })
    }
}
