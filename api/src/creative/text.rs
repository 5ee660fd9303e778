use super::{ensure_success, mock, MOCK_PROVIDER};
use crate::error::{ApiError, ApiResult};
use casavida_core::config::TextProviderConfig;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const MAX_VARIATIONS: usize = 5;
const PROVIDER: &str = "openai";

/// What the marketer asked the Creative Studio for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyBrief {
    pub segment: String,
    pub product: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_variations")]
    pub variations: usize,
}

fn default_tone() -> String {
    "warm".into()
}

fn default_variations() -> usize {
    3
}

impl CopyBrief {
    /// Variations requested, clamped to 1..=MAX_VARIATIONS.
    pub fn variation_count(&self) -> usize {
        self.variations.clamp(1, MAX_VARIATIONS)
    }

    fn prompt(&self) -> String {
        format!(
            "Write {} distinct short marketing messages (max 40 words each) for CasaVida, \
             a furniture retailer. Audience segment: {}. Product: {}. Tone: {}. \
             Return one message per line with no numbering.",
            self.variation_count(),
            self.segment,
            self.product,
            self.tone
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyVariations {
    pub provider: &'static str,
    pub variations: Vec<String>,
}

/// OpenAI-compatible chat completions client.
pub struct TextClient {
    http: reqwest::Client,
    config: TextProviderConfig,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl TextClient {
    pub fn new(http: reqwest::Client, config: TextProviderConfig) -> Self {
        Self { http, config }
    }

    pub fn is_live(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub async fn generate(&self, brief: &CopyBrief) -> ApiResult<CopyVariations> {
        if brief.segment.trim().is_empty() || brief.product.trim().is_empty() {
            return Err(ApiError::validation("segment and product are required"));
        }
        let Some(key) = self.config.api_key.as_deref() else {
            log::warn!("creative: no text provider key, using mock copy");
            return Ok(CopyVariations {
                provider: MOCK_PROVIDER,
                variations: mock::copy_variations(brief),
            });
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = json!({
            "model": self.config.model,
            "temperature": 0.9,
            "messages": [
                {"role": "system", "content": "You are a senior copywriter for a home furniture brand."},
                {"role": "user", "content": brief.prompt()},
            ],
        });
        let response = self.http.post(url).bearer_auth(key).json(&body).send().await?;
        let parsed: ChatResponse = ensure_success(PROVIDER, response).await?.json().await?;

        let content = parsed
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| ApiError::ProviderPayload {
                provider: PROVIDER,
                detail: "no message content in choices".into(),
            })?;
        let variations = split_variations(&content, brief.variation_count());
        if variations.is_empty() {
            return Err(ApiError::ProviderPayload {
                provider: PROVIDER,
                detail: "empty completion".into(),
            });
        }
        log::info!("creative: {} copy variations from {PROVIDER}", variations.len());
        Ok(CopyVariations {
            provider: PROVIDER,
            variations,
        })
    }
}

/// One variation per non-empty line, list markers stripped.
fn split_variations(content: &str, max: usize) -> Vec<String> {
    content
        .lines()
        .map(|line| strip_list_marker(line.trim()).trim_matches('"').to_string())
        .filter(|line| !line.is_empty())
        .take(max)
        .collect()
}

/// Drop a leading `1.` / `2)` / `-` / `*` marker. Only counts as a marker
/// when followed by whitespace, so "3-seat sofa" and "2024 collection" stay.
fn strip_list_marker(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    let numbered = rest.len() < line.len();
    let after_marker = if numbered {
        rest.strip_prefix(|c: char| matches!(c, '.' | ')'))
    } else {
        rest.strip_prefix(|c: char| matches!(c, '-' | '*'))
    };
    match after_marker {
        Some(tail) if tail.starts_with(char::is_whitespace) => tail.trim_start(),
        _ => line,
    }
}
