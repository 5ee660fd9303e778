//! Fixed customer segment profiles for the synthetic dataset.
//!
//! The three segments and their before/after distribution parameters are
//! part of the dataset contract: they are not configurable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which strategy scenario a dataset describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Before,
    After,
}

impl Scenario {
    /// Map a `period` query value. Only `"after"` selects [`Scenario::After`].
    pub fn from_period(period: &str) -> Self {
        if period == "after" {
            Self::After
        } else {
            Self::Before
        }
    }

    pub fn from_flag(is_after_strategy: bool) -> Self {
        if is_after_strategy {
            Self::After
        } else {
            Self::Before
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }

    /// Date that `daysInactive` is counted back from.
    pub fn anchor_date(&self) -> NaiveDate {
        match self {
            Self::Before => NaiveDate::from_ymd_opt(2024, 2, 1),
            Self::After => NaiveDate::from_ymd_opt(2024, 8, 1),
        }
        .unwrap_or(NaiveDate::MIN)
    }

    /// Inclusive-exclusive span of `daysInactive` as (base, width).
    pub fn inactivity_span(&self) -> (f64, f64) {
        match self {
            Self::Before => (30.0, 150.0),
            Self::After => (5.0, 55.0),
        }
    }
}

/// Mean/std triples shaping one scenario of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionParams {
    pub churn_mean: f64,
    pub churn_std: f64,
    pub clv_mean: f64,
    pub clv_std: f64,
    pub health_mean: f64,
    pub health_std: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentProfile {
    pub prefix: &'static str,
    pub name: &'static str,
    pub count: u32,
    pub before: DistributionParams,
    pub after: DistributionParams,
}

impl SegmentProfile {
    pub fn params(&self, scenario: Scenario) -> &DistributionParams {
        match scenario {
            Scenario::Before => &self.before,
            Scenario::After => &self.after,
        }
    }
}

/// Segment profiles in generation order: FH, HE, OB.
/// NEVER reorder: ids are assigned in this order.
pub const SEGMENT_PROFILES: [SegmentProfile; 3] = [
    SegmentProfile {
        prefix: "FH",
        name: "Functional Homemakers",
        count: 4200,
        before: DistributionParams {
            churn_mean: 0.38,
            churn_std: 0.08,
            clv_mean: 680.0,
            clv_std: 120.0,
            health_mean: 28.0,
            health_std: 8.0,
        },
        after: DistributionParams {
            churn_mean: 0.15,
            churn_std: 0.05,
            clv_mean: 820.0,
            clv_std: 100.0,
            health_mean: 72.0,
            health_std: 10.0,
        },
    },
    SegmentProfile {
        prefix: "HE",
        name: "Home Enhancers",
        count: 890,
        before: DistributionParams {
            churn_mean: 0.22,
            churn_std: 0.06,
            clv_mean: 1850.0,
            clv_std: 250.0,
            health_mean: 42.0,
            health_std: 10.0,
        },
        after: DistributionParams {
            churn_mean: 0.18,
            churn_std: 0.04,
            clv_mean: 1920.0,
            clv_std: 200.0,
            health_mean: 55.0,
            health_std: 8.0,
        },
    },
    SegmentProfile {
        prefix: "OB",
        name: "Occasional Browsers",
        count: 2100,
        before: DistributionParams {
            churn_mean: 0.55,
            churn_std: 0.12,
            clv_mean: 180.0,
            clv_std: 50.0,
            health_mean: 18.0,
            health_std: 6.0,
        },
        after: DistributionParams {
            churn_mean: 0.42,
            churn_std: 0.10,
            clv_mean: 210.0,
            clv_std: 45.0,
            health_mean: 28.0,
            health_std: 7.0,
        },
    },
];

/// Cities a synthetic customer can be placed in.
pub const REGIONS: [&str; 5] = ["Madrid", "Barcelona", "Valencia", "Seville", "Bilbao"];

/// Total number of records in any generated dataset.
pub fn total_customer_count() -> usize {
    SEGMENT_PROFILES.iter().map(|s| s.count as usize).sum()
}
