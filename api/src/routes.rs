//! API routes for the CasaVida dashboard
//!
//! Dataset reads are recomputed on every request; the relational
//! routes go through the store; creative routes call the providers.

use crate::creative::{voice::AUDIO_CONTENT_TYPE, CopyBrief};
use crate::error::ApiResult;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use casavida_core::{
    dataset::{summarize_segments, SegmentSummary, SyntheticCustomerRecord},
    entities::{
        Campaign, Competitor, Initiative, NewCampaign, NewCompetitor, NewInitiative, NewSegment,
        Segment,
    },
    seed::{seed_crisis_scenario, SeedSummary},
    segment::Scenario,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type AppStateArc = Arc<AppState>;

/// Response header naming which provider produced a binary asset.
pub const PROVIDER_HEADER: &str = "x-creative-provider";

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

// ============================================================================
// Dataset Routes
// ============================================================================

pub fn dataset_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/dataset/customers", get(dataset_customers))
        .route("/dataset/summary", get(dataset_summary))
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

impl PeriodQuery {
    fn scenario(&self) -> Scenario {
        Scenario::from_period(self.period.as_deref().unwrap_or_default())
    }
}

async fn dataset_customers(
    State(state): State<AppStateArc>,
    Query(query): Query<PeriodQuery>,
) -> Json<Vec<SyntheticCustomerRecord>> {
    let scenario = query.scenario();
    log::debug!("dataset: customers requested (period={})", scenario.label());
    Json(state.generator.generate(scenario))
}

async fn dataset_summary(
    State(state): State<AppStateArc>,
    Query(query): Query<PeriodQuery>,
) -> Json<Vec<SegmentSummary>> {
    let records = state.generator.generate(query.scenario());
    Json(summarize_segments(&records))
}

// ============================================================================
// Segment Routes
// ============================================================================

pub fn segment_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/segments", get(list_segments).post(create_segment))
        .route(
            "/segments/:id",
            get(get_segment).put(update_segment).delete(delete_segment),
        )
}

async fn list_segments(State(state): State<AppStateArc>) -> ApiResult<Json<Vec<Segment>>> {
    let store = state.store.lock().await;
    Ok(Json(store.list_segments()?))
}

async fn create_segment(
    State(state): State<AppStateArc>,
    Json(req): Json<NewSegment>,
) -> ApiResult<(StatusCode, Json<Segment>)> {
    let store = state.store.lock().await;
    let created = store.insert_segment(&req)?;
    log::info!("segment created: {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_segment(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> ApiResult<Json<Segment>> {
    let store = state.store.lock().await;
    Ok(Json(store.get_segment(&id)?))
}

async fn update_segment(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
    Json(req): Json<NewSegment>,
) -> ApiResult<Json<Segment>> {
    let store = state.store.lock().await;
    let updated = store.update_segment(&id, &req)?;
    log::info!("segment updated: {id}");
    Ok(Json(updated))
}

async fn delete_segment(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let store = state.store.lock().await;
    store.delete_segment(&id)?;
    log::info!("segment deleted: {id}");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Competitor Routes
// ============================================================================

pub fn competitor_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/competitors", get(list_competitors).post(create_competitor))
        .route(
            "/competitors/:id",
            get(get_competitor)
                .put(update_competitor)
                .delete(delete_competitor),
        )
}

async fn list_competitors(State(state): State<AppStateArc>) -> ApiResult<Json<Vec<Competitor>>> {
    let store = state.store.lock().await;
    Ok(Json(store.list_competitors()?))
}

async fn create_competitor(
    State(state): State<AppStateArc>,
    Json(req): Json<NewCompetitor>,
) -> ApiResult<(StatusCode, Json<Competitor>)> {
    let store = state.store.lock().await;
    let created = store.insert_competitor(&req)?;
    log::info!("competitor created: {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_competitor(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> ApiResult<Json<Competitor>> {
    let store = state.store.lock().await;
    Ok(Json(store.get_competitor(&id)?))
}

async fn update_competitor(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
    Json(req): Json<NewCompetitor>,
) -> ApiResult<Json<Competitor>> {
    let store = state.store.lock().await;
    let updated = store.update_competitor(&id, &req)?;
    log::info!("competitor updated: {id}");
    Ok(Json(updated))
}

async fn delete_competitor(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let store = state.store.lock().await;
    store.delete_competitor(&id)?;
    log::info!("competitor deleted: {id}");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Initiative Routes
// ============================================================================

pub fn initiative_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/initiatives", get(list_initiatives).post(create_initiative))
        .route(
            "/initiatives/:id",
            get(get_initiative)
                .put(update_initiative)
                .delete(delete_initiative),
        )
}

async fn list_initiatives(State(state): State<AppStateArc>) -> ApiResult<Json<Vec<Initiative>>> {
    let store = state.store.lock().await;
    Ok(Json(store.list_initiatives()?))
}

async fn create_initiative(
    State(state): State<AppStateArc>,
    Json(req): Json<NewInitiative>,
) -> ApiResult<(StatusCode, Json<Initiative>)> {
    let store = state.store.lock().await;
    let created = store.insert_initiative(&req)?;
    log::info!("initiative created: {} ({})", created.title, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_initiative(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> ApiResult<Json<Initiative>> {
    let store = state.store.lock().await;
    Ok(Json(store.get_initiative(&id)?))
}

async fn update_initiative(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
    Json(req): Json<NewInitiative>,
) -> ApiResult<Json<Initiative>> {
    let store = state.store.lock().await;
    let updated = store.update_initiative(&id, &req)?;
    log::info!("initiative updated: {id} (status={})", updated.status);
    Ok(Json(updated))
}

async fn delete_initiative(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let store = state.store.lock().await;
    store.delete_initiative(&id)?;
    log::info!("initiative deleted: {id}");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Campaign Routes
// ============================================================================

/// Campaigns are generated assets: no update route.
pub fn campaign_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route("/campaigns/:id", get(get_campaign).delete(delete_campaign))
}

async fn list_campaigns(State(state): State<AppStateArc>) -> ApiResult<Json<Vec<Campaign>>> {
    let store = state.store.lock().await;
    Ok(Json(store.list_campaigns()?))
}

async fn create_campaign(
    State(state): State<AppStateArc>,
    Json(req): Json<NewCampaign>,
) -> ApiResult<(StatusCode, Json<Campaign>)> {
    let store = state.store.lock().await;
    let created = store.insert_campaign(&req)?;
    log::info!("campaign saved: {} ({})", created.title, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_campaign(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> ApiResult<Json<Campaign>> {
    let store = state.store.lock().await;
    Ok(Json(store.get_campaign(&id)?))
}

async fn delete_campaign(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let store = state.store.lock().await;
    store.delete_campaign(&id)?;
    log::info!("campaign deleted: {id}");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Seed Routes
// ============================================================================

pub fn seed_routes() -> Router<AppStateArc> {
    Router::new().route("/seed", post(seed))
}

async fn seed(State(state): State<AppStateArc>) -> ApiResult<Json<SeedSummary>> {
    let store = state.store.lock().await;
    Ok(Json(seed_crisis_scenario(&store)?))
}

// ============================================================================
// Creative Studio Routes
// ============================================================================

pub fn creative_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/creative/copy", post(creative_copy))
        .route("/creative/image", post(creative_image))
        .route("/creative/voice", post(creative_voice))
}

#[derive(Debug, Deserialize)]
pub struct CopyRequest {
    #[serde(flatten)]
    pub brief: CopyBrief,
    /// Persist the first variation as a campaign.
    #[serde(default)]
    pub save: bool,
    #[serde(default)]
    pub channel: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub provider: &'static str,
    pub variations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<Campaign>,
}

async fn creative_copy(
    State(state): State<AppStateArc>,
    Json(req): Json<CopyRequest>,
) -> ApiResult<Json<CopyResponse>> {
    let generated = state.studio.text.generate(&req.brief).await?;

    let campaign = match (req.save, generated.variations.first()) {
        (true, Some(first)) => {
            let store = state.store.lock().await;
            let saved = store.insert_campaign(&NewCampaign {
                title: format!("{} for {}", req.brief.product.trim(), req.brief.segment.trim()),
                channel: req.channel.clone().unwrap_or_else(|| "email".into()),
                segment_name: req.brief.segment.clone(),
                prompt: format!("{} / {}", req.brief.product, req.brief.tone),
                content: first.clone(),
                asset_kind: "copy".into(),
            })?;
            log::info!("campaign saved from creative copy: {}", saved.id);
            Some(saved)
        }
        _ => None,
    };

    Ok(Json(CopyResponse {
        provider: generated.provider,
        variations: generated.variations,
        campaign,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

async fn creative_image(
    State(state): State<AppStateArc>,
    Json(req): Json<ImageRequest>,
) -> ApiResult<Response> {
    let image = state.studio.image.generate(&req.prompt).await?;
    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (HeaderName::from_static(PROVIDER_HEADER), image.provider),
        ],
        image.bytes,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
}

async fn creative_voice(
    State(state): State<AppStateArc>,
    Json(req): Json<VoiceRequest>,
) -> ApiResult<Response> {
    let clip = state
        .studio
        .voice
        .synthesize(&req.text, req.voice.as_deref())
        .await?;
    Ok((
        [
            (header::CONTENT_TYPE, AUDIO_CONTENT_TYPE),
            (HeaderName::from_static(PROVIDER_HEADER), clip.provider),
        ],
        clip.bytes,
    )
        .into_response())
}
