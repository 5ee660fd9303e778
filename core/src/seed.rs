//! Demonstration data: the "crisis" scenario the dashboard opens on.
//!
//! Churn is up in the core Functional Homemakers segment, discount
//! competitors are taking share, and the retention initiatives are still
//! on the drawing board. Segment figures mirror the "before" dataset.

use crate::{
    entities::{NewCompetitor, NewInitiative, NewSegment},
    error::CasaResult,
    segment::SEGMENT_PROFILES,
    store::CasaStore,
};
use serde::{Deserialize, Serialize};

/// Row counts per table after a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub segments: i64,
    pub competitors: i64,
    pub initiatives: i64,
    pub campaigns: i64,
}

const SEGMENT_DESCRIPTIONS: [&str; 3] = [
    "Value-driven households furnishing on a budget; the historical revenue base.",
    "Design-conscious upgraders buying premium collections and services.",
    "Low-intent visitors who buy once during promotions.",
];

fn crisis_competitors() -> Vec<NewCompetitor> {
    vec![
        NewCompetitor {
            name: "Nordhaus Living".into(),
            market_share: 0.31,
            price_position: "low".into(),
            threat_level: "high".into(),
            notes: "Flat-pack range undercuts our entry line by 20%.".into(),
        },
        NewCompetitor {
            name: "Mueble Express".into(),
            market_share: 0.18,
            price_position: "low".into(),
            threat_level: "high".into(),
            notes: "Next-day delivery in all five metro regions.".into(),
        },
        NewCompetitor {
            name: "Atelier Maison".into(),
            market_share: 0.12,
            price_position: "premium".into(),
            threat_level: "medium".into(),
            notes: "Courting Home Enhancers with in-home design consults.".into(),
        },
        NewCompetitor {
            name: "HomeCraft Online".into(),
            market_share: 0.09,
            price_position: "mid".into(),
            threat_level: "low".into(),
            notes: "Marketplace model, thin margins, weak after-sales.".into(),
        },
    ]
}

fn crisis_initiatives(segment_ids: &[String]) -> Vec<NewInitiative> {
    let seg = |idx: usize| segment_ids.get(idx).cloned();
    vec![
        NewInitiative {
            title: "Homemaker Loyalty Program".into(),
            description: "Points on repeat purchases and free assembly for members.".into(),
            status: "planned".into(),
            budget: 250_000.0,
            expected_impact: "Cut Functional Homemaker churn from 38% to 15%".into(),
            segment_id: seg(0),
        },
        NewInitiative {
            title: "Design Services Bundle".into(),
            description: "Complimentary room planning with premium collection orders.".into(),
            status: "planned".into(),
            budget: 120_000.0,
            expected_impact: "Lift Home Enhancer CLV by 4%".into(),
            segment_id: seg(1),
        },
        NewInitiative {
            title: "Win-back Email Journeys".into(),
            description: "Triggered sequences after 30 days of inactivity.".into(),
            status: "active".into(),
            budget: 40_000.0,
            expected_impact: "Reactivate 10% of lapsed Occasional Browsers".into(),
            segment_id: seg(2),
        },
        NewInitiative {
            title: "Price-match Guarantee".into(),
            description: "Match discount competitors on the top 200 SKUs.".into(),
            status: "planned".into(),
            budget: 300_000.0,
            expected_impact: "Stop share loss to low-price entrants".into(),
            segment_id: None,
        },
    ]
}

/// Drop and recreate every table, then insert the crisis dataset.
/// All-or-nothing: a failed insert leaves the previous rows in place.
pub fn seed_crisis_scenario(store: &CasaStore) -> CasaResult<SeedSummary> {
    store.in_transaction(|s| {
        s.reset()?;
        let mut segment_ids = Vec::with_capacity(SEGMENT_PROFILES.len());
        for (profile, description) in SEGMENT_PROFILES.iter().zip(SEGMENT_DESCRIPTIONS) {
            let before = &profile.before;
            let segment = s.insert_segment(&NewSegment {
                name: profile.name.to_string(),
                description: description.to_string(),
                customer_count: i64::from(profile.count),
                churn_rate: before.churn_mean,
                avg_clv: before.clv_mean,
                health_score: before.health_mean.round() as i64,
            })?;
            segment_ids.push(segment.id);
        }
        for competitor in crisis_competitors() {
            s.insert_competitor(&competitor)?;
        }
        for initiative in crisis_initiatives(&segment_ids) {
            s.insert_initiative(&initiative)?;
        }
        Ok(())
    })?;

    let summary = SeedSummary {
        segments: store.table_count("segment")?,
        competitors: store.table_count("competitor")?,
        initiatives: store.table_count("initiative")?,
        campaigns: store.table_count("campaign")?,
    };
    log::info!(
        "seed: crisis scenario loaded ({} segments, {} competitors, {} initiatives)",
        summary.segments,
        summary.competitors,
        summary.initiatives
    );
    Ok(summary)
}
