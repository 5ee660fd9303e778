//! Synthetic customer dataset generation.
//!
//! RULE: generation is a pure function of (scenario, draw source).
//! The global record id is threaded through the segment loop as an
//! explicit accumulator; there is no module-level counter.

use crate::{
    rng::{box_muller, DrawSource, RecordDraws},
    segment::{Scenario, SegmentProfile, REGIONS, SEGMENT_PROFILES, total_customer_count},
    types::RecordId,
};
use chrono::Days;
use serde::{Deserialize, Serialize};

pub const CHURN_FLOOR: f64 = 0.05;
pub const CHURN_CEILING: f64 = 0.85;
pub const ACTUAL_CHURN_FLOOR: f64 = 0.03;
pub const CLV_FLOOR: i64 = 50;
pub const HEALTH_FLOOR: i64 = 5;
pub const HEALTH_CEILING: i64 = 95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticCustomerRecord {
    pub id: RecordId,
    pub customer_id: String,
    pub segment: String,
    pub predicted_churn_risk: f64,
    pub actual_churn: f64,
    pub clv: i64,
    pub health_score: i64,
    pub purchase_freq: f64,
    pub avg_order_value: i64,
    pub days_inactive: i64,
    pub total_orders: i64,
    pub tenure: i64,
    pub last_purchase: String,
    pub region: String,
}

/// Generates the full dataset with a chosen draw source.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetGenerator {
    source: DrawSource,
}

impl DatasetGenerator {
    pub fn new(source: DrawSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> DrawSource {
        self.source
    }

    /// All 7190 records: FH block, then HE, then OB.
    pub fn generate(&self, scenario: Scenario) -> Vec<SyntheticCustomerRecord> {
        let mut records = Vec::with_capacity(total_customer_count());
        let mut next_id: RecordId = 1;
        for profile in &SEGMENT_PROFILES {
            next_id = self.generate_segment(profile, scenario, next_id, &mut records);
        }
        log::debug!(
            "dataset: generated {} customers (scenario={}, source={})",
            records.len(),
            scenario.label(),
            self.source.name()
        );
        records
    }

    /// Append one segment's block and return the next free id.
    fn generate_segment(
        &self,
        profile: &SegmentProfile,
        scenario: Scenario,
        first_id: RecordId,
        out: &mut Vec<SyntheticCustomerRecord>,
    ) -> RecordId {
        let mut id = first_id;
        for i in 0..profile.count {
            out.push(self.build_record(profile, scenario, id, i));
            id += 1;
        }
        id
    }

    /// Build the record at global `id`, which is the `i`-th (0-based) of its segment.
    pub fn build_record(
        &self,
        profile: &SegmentProfile,
        scenario: Scenario,
        id: RecordId,
        i: u32,
    ) -> SyntheticCustomerRecord {
        let seed = record_seed(id, i);
        let draws = self.source.draws(seed);
        derive_record(profile, scenario, id, i, &draws)
    }
}

/// `id * 1000 + i`, the seed every draw of a record hangs off.
pub fn record_seed(id: RecordId, i: u32) -> u64 {
    u64::from(id) * 1000 + u64::from(i)
}

/// The full dataset for the before (`false`) or after (`true`) strategy,
/// using the default sine-hash draws.
pub fn generate_full_customer_dataset(is_after_strategy: bool) -> Vec<SyntheticCustomerRecord> {
    DatasetGenerator::default().generate(Scenario::from_flag(is_after_strategy))
}

fn derive_record(
    profile: &SegmentProfile,
    scenario: Scenario,
    id: RecordId,
    i: u32,
    draws: &RecordDraws,
) -> SyntheticCustomerRecord {
    let [r1, r2, r3, r4, r5] = *draws;
    let p = profile.params(scenario);

    let z = box_muller(r1, r2);
    let churn = round_to(
        (p.churn_mean + z * p.churn_std).clamp(CHURN_FLOOR, CHURN_CEILING),
        2,
    );
    let actual_churn = round_to((churn - 0.02 + r3 * 0.04).max(ACTUAL_CHURN_FLOOR), 3);

    let clv = ((p.clv_mean + (r4 - 0.5) * p.clv_std * 2.0).round() as i64).max(CLV_FLOOR);
    let health_score = ((p.health_mean + (r5 - 0.5) * p.health_std * 2.0).round() as i64)
        .clamp(HEALTH_FLOOR, HEALTH_CEILING);

    let purchase_freq = round_to(0.5 + r1 * 4.0, 1);
    let avg_order_value = (clv as f64 / (3.0 + r2 * 4.0)).round() as i64;

    let (inactive_base, inactive_width) = scenario.inactivity_span();
    let days_inactive = (inactive_base + r3 * inactive_width).round() as i64;

    let total_orders = 3 + (r4 * 21.0).floor() as i64;
    let tenure = 6 + (r5 * 49.0).floor() as i64;

    let anchor = scenario.anchor_date();
    let last_purchase = anchor
        .checked_sub_days(Days::new(days_inactive.max(0) as u64))
        .unwrap_or(anchor)
        .format("%Y-%m-%d")
        .to_string();

    let region_idx = ((r1 * REGIONS.len() as f64).floor() as usize).min(REGIONS.len() - 1);

    SyntheticCustomerRecord {
        id,
        customer_id: format!("{}-{:04}", profile.prefix, i + 1),
        segment: profile.name.to_string(),
        predicted_churn_risk: churn,
        actual_churn,
        clv,
        health_score,
        purchase_freq,
        avg_order_value,
        days_inactive,
        total_orders,
        tenure,
        last_purchase,
        region: REGIONS[region_idx].to_string(),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ── Segment summaries ─────────────────────────────────────────────

/// Per-segment averages plotted on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSummary {
    pub segment: String,
    pub prefix: String,
    pub count: usize,
    pub avg_predicted_churn: f64,
    pub avg_actual_churn: f64,
    pub avg_clv: f64,
    pub avg_health_score: f64,
    pub avg_days_inactive: f64,
}

/// Summaries in segment order. Segments with no records report zero means.
pub fn summarize_segments(records: &[SyntheticCustomerRecord]) -> Vec<SegmentSummary> {
    SEGMENT_PROFILES
        .iter()
        .map(|profile| {
            let rows: Vec<_> = records.iter().filter(|r| r.segment == profile.name).collect();
            SegmentSummary {
                segment: profile.name.to_string(),
                prefix: profile.prefix.to_string(),
                count: rows.len(),
                avg_predicted_churn: round_to(mean_of(&rows, |r| r.predicted_churn_risk), 4),
                avg_actual_churn: round_to(mean_of(&rows, |r| r.actual_churn), 4),
                avg_clv: round_to(mean_of(&rows, |r| r.clv as f64), 2),
                avg_health_score: round_to(mean_of(&rows, |r| r.health_score as f64), 2),
                avg_days_inactive: round_to(mean_of(&rows, |r| r.days_inactive as f64), 2),
            }
        })
        .collect()
}

fn mean_of(rows: &[&SyntheticCustomerRecord], field: fn(&SyntheticCustomerRecord) -> f64) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| field(r)).sum::<f64>() / rows.len() as f64
}
