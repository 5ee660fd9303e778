use crate::rng::DrawSource;
use serde::{Deserialize, Serialize};

pub const TEXT_KEY_ENV: &str = "CASAVIDA_TEXT_API_KEY";
pub const IMAGE_KEY_ENV: &str = "CASAVIDA_IMAGE_API_KEY";
pub const VOICE_KEY_ENV: &str = "CASAVIDA_VOICE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_path: String,
    pub draw_source: DrawSource,
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".into(),
            db_path: "casavida.db".into(),
            draw_source: DrawSource::SineHash,
            providers: ProvidersConfig::default(),
        }
    }
}

// ── Creative Studio providers ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub request_timeout_secs: u64,
    pub text: TextProviderConfig,
    pub image: ImageProviderConfig,
    pub voice: VoiceProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
            text: TextProviderConfig::default(),
            image: ImageProviderConfig::default(),
            voice: VoiceProviderConfig::default(),
        }
    }
}

/// OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextProviderConfig {
    pub base_url: String,
    pub model: String,
    /// Never serialized back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for TextProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageProviderConfig {
    pub base_url: String,
    pub model: String,
    pub size: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for ImageProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "dall-e-3".into(),
            size: "1024x1024".into(),
            api_key: None,
        }
    }
}

/// ElevenLabs-style text-to-speech endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceProviderConfig {
    pub base_url: String,
    pub default_voice_id: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for VoiceProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io/v1".into(),
            default_voice_id: "21m00Tcm4TlvDq8ikWAM".into(),
            model: "eleven_multilingual_v2".into(),
            api_key: None,
        }
    }
}

impl AppConfig {
    /// Load from an optional JSON file, then apply credential overrides
    /// from the environment. Missing file path means built-in defaults.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .map_err(|e| anyhow::anyhow!("reading config {p}: {e}"))?;
                serde_json::from_str::<AppConfig>(&raw)
                    .map_err(|e| anyhow::anyhow!("parsing config {p}: {e}"))?
            }
            None => AppConfig::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Fill provider keys from `lookup`. Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(k) = non_empty(TEXT_KEY_ENV) {
            self.providers.text.api_key = Some(k);
        }
        if let Some(k) = non_empty(IMAGE_KEY_ENV) {
            self.providers.image.api_key = Some(k);
        }
        if let Some(k) = non_empty(VOICE_KEY_ENV) {
            self.providers.voice.api_key = Some(k);
        }
    }

    /// In-memory database, no provider keys: every creative call is mocked.
    pub fn default_test() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".into(),
            db_path: ":memory:".into(),
            ..Self::default()
        }
    }
}
