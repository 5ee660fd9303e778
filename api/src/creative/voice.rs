use super::{ensure_success, mock, MOCK_PROVIDER};
use crate::error::{ApiError, ApiResult};
use casavida_core::config::VoiceProviderConfig;
use serde_json::json;

const PROVIDER: &str = "elevenlabs";
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
pub const MAX_TEXT_CHARS: usize = 2_500;

#[derive(Debug, Clone)]
pub struct SpeechClip {
    pub provider: &'static str,
    pub bytes: Vec<u8>,
}

/// ElevenLabs-style text-to-speech client. Always returns MP3.
pub struct VoiceClient {
    http: reqwest::Client,
    config: VoiceProviderConfig,
}

impl VoiceClient {
    pub fn new(http: reqwest::Client, config: VoiceProviderConfig) -> Self {
        Self { http, config }
    }

    pub fn is_live(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> ApiResult<SpeechClip> {
        if text.trim().is_empty() {
            return Err(ApiError::validation("text must not be empty"));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(ApiError::validation(format!(
                "text exceeds {MAX_TEXT_CHARS} characters"
            )));
        }
        let Some(key) = self.config.api_key.as_deref() else {
            log::warn!("creative: no voice provider key, using silent mock clip");
            return Ok(SpeechClip {
                provider: MOCK_PROVIDER,
                bytes: mock::silent_mp3(text),
            });
        };

        let voice = voice_id
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(self.config.default_voice_id.as_str());
        let url = format!(
            "{}/text-to-speech/{voice}",
            self.config.base_url.trim_end_matches('/')
        );
        let body = json!({
            "text": text,
            "model_id": self.config.model,
        });
        let response = self
            .http
            .post(url)
            .header("xi-api-key", key)
            .header(reqwest::header::ACCEPT, AUDIO_CONTENT_TYPE)
            .json(&body)
            .send()
            .await?;
        let bytes = ensure_success(PROVIDER, response).await?.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::ProviderPayload {
                provider: PROVIDER,
                detail: "empty audio body".into(),
            });
        }
        log::info!("creative: {} byte clip from {PROVIDER} (voice={voice})", bytes.len());
        Ok(SpeechClip {
            provider: PROVIDER,
            bytes: bytes.to_vec(),
        })
    }
}
