//! Relational entities behind the dashboard's CRUD surface.
//!
//! Each entity comes as a stored record (with `id` and `created_at`)
//! and a `New*` input used for both create and full replacement.

use crate::{
    error::{CasaError, CasaResult},
    types::{EntityId, Timestamp},
};
use serde::{Deserialize, Serialize};

pub const INITIATIVE_STATUSES: [&str; 3] = ["planned", "active", "completed"];
pub const ASSET_KINDS: [&str; 3] = ["copy", "image", "voice"];
pub const THREAT_LEVELS: [&str; 3] = ["low", "medium", "high"];

fn require_text(field: &str, value: &str) -> CasaResult<()> {
    if value.trim().is_empty() {
        return Err(CasaError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_fraction(field: &str, value: f64) -> CasaResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CasaError::Validation(format!(
            "{field} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn require_one_of(field: &str, value: &str, allowed: &[&str]) -> CasaResult<()> {
    if !allowed.contains(&value) {
        return Err(CasaError::Validation(format!(
            "{field} must be one of {}, got '{value}'",
            allowed.join("|")
        )));
    }
    Ok(())
}

// ── Segment ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub customer_count: i64,
    pub churn_rate: f64,
    pub avg_clv: f64,
    pub health_score: i64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSegment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub customer_count: i64,
    #[serde(default)]
    pub churn_rate: f64,
    #[serde(default)]
    pub avg_clv: f64,
    #[serde(default)]
    pub health_score: i64,
}

impl NewSegment {
    pub fn validate(&self) -> CasaResult<()> {
        require_text("name", &self.name)?;
        require_fraction("churn_rate", self.churn_rate)?;
        if self.customer_count < 0 {
            return Err(CasaError::Validation("customer_count must be >= 0".into()));
        }
        if !(0..=100).contains(&self.health_score) {
            return Err(CasaError::Validation("health_score must be within [0, 100]".into()));
        }
        Ok(())
    }
}

// ── Competitor ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: EntityId,
    pub name: String,
    pub market_share: f64,
    pub price_position: String,
    pub threat_level: String,
    pub notes: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCompetitor {
    pub name: String,
    #[serde(default)]
    pub market_share: f64,
    #[serde(default = "default_price_position")]
    pub price_position: String,
    #[serde(default = "default_threat_level")]
    pub threat_level: String,
    #[serde(default)]
    pub notes: String,
}

fn default_price_position() -> String {
    "mid".into()
}

fn default_threat_level() -> String {
    "medium".into()
}

impl NewCompetitor {
    pub fn validate(&self) -> CasaResult<()> {
        require_text("name", &self.name)?;
        require_fraction("market_share", self.market_share)?;
        require_one_of("threat_level", &self.threat_level, &THREAT_LEVELS)
    }
}

// ── Initiative ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub status: String, // planned | active | completed
    pub budget: f64,
    pub expected_impact: String,
    pub segment_id: Option<EntityId>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInitiative {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub expected_impact: String,
    #[serde(default)]
    pub segment_id: Option<EntityId>,
}

fn default_status() -> String {
    "planned".into()
}

impl NewInitiative {
    pub fn validate(&self) -> CasaResult<()> {
        require_text("title", &self.title)?;
        require_one_of("status", &self.status, &INITIATIVE_STATUSES)?;
        if self.budget < 0.0 {
            return Err(CasaError::Validation("budget must be >= 0".into()));
        }
        Ok(())
    }
}

// ── Campaign ──────────────────────────────────────────────────────

/// A generated Creative Studio asset. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: EntityId,
    pub title: String,
    pub channel: String,
    pub segment_name: String,
    pub prompt: String,
    pub content: String,
    pub asset_kind: String, // copy | image | voice
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub title: String,
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default)]
    pub segment_name: String,
    #[serde(default)]
    pub prompt: String,
    pub content: String,
    #[serde(default = "default_asset_kind")]
    pub asset_kind: String,
}

fn default_channel() -> String {
    "email".into()
}

fn default_asset_kind() -> String {
    "copy".into()
}

impl NewCampaign {
    pub fn validate(&self) -> CasaResult<()> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)?;
        require_one_of("asset_kind", &self.asset_kind, &ASSET_KINDS)
    }
}
