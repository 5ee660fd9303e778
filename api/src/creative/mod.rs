//! Creative Studio: marketing copy, images and voice-overs.
//!
//! RULE: a provider without a configured credential answers from the
//! deterministic mock in `mock.rs`. A provider WITH a credential never
//! falls back; its failures surface as errors.

use crate::error::{ApiError, ApiResult};
use casavida_core::config::ProvidersConfig;
use std::time::Duration;

pub mod image;
pub mod mock;
pub mod text;
pub mod voice;

pub use image::{GeneratedImage, ImageClient};
pub use text::{CopyBrief, CopyVariations, TextClient};
pub use voice::{SpeechClip, VoiceClient};

/// Name reported when output came from the local mock.
pub const MOCK_PROVIDER: &str = "mock";

/// All three providers, sharing one HTTP client.
pub struct CreativeStudio {
    pub text: TextClient,
    pub image: ImageClient,
    pub voice: VoiceClient,
}

impl CreativeStudio {
    pub fn new(config: &ProvidersConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            text: TextClient::new(http.clone(), config.text.clone()),
            image: ImageClient::new(http.clone(), config.image.clone()),
            voice: VoiceClient::new(http, config.voice.clone()),
        }
    }

    /// Which providers will hit the network, by kind.
    pub fn live_providers(&self) -> Vec<&'static str> {
        let mut live = Vec::new();
        if self.text.is_live() {
            live.push("text");
        }
        if self.image.is_live() {
            live.push("image");
        }
        if self.voice.is_live() {
            live.push("voice");
        }
        live
    }
}

/// Turn a non-2xx provider response into a `ProviderStatus` error.
async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::ProviderStatus {
        provider,
        status: status.as_u16(),
        body: truncate(&body, 500),
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}
