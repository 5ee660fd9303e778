//! Dataset generator contract: shape, ranges, and scenario shift.

use casavida_core::{
    dataset::{summarize_segments, DatasetGenerator, SyntheticCustomerRecord},
    generate_full_customer_dataset,
    rng::DrawSource,
    segment::{Scenario, SEGMENT_PROFILES},
};

fn segment_block<'a>(
    records: &'a [SyntheticCustomerRecord],
    name: &str,
) -> Vec<&'a SyntheticCustomerRecord> {
    records.iter().filter(|r| r.segment == name).collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    sum / n as f64
}

#[test]
fn dataset_has_7190_records_in_segment_blocks() {
    for after in [false, true] {
        let data = generate_full_customer_dataset(after);
        assert_eq!(data.len(), 7190);

        let fh = &data[..4200];
        let he = &data[4200..5090];
        let ob = &data[5090..];
        assert!(fh.iter().all(|r| r.segment == "Functional Homemakers"));
        assert!(he.iter().all(|r| r.segment == "Home Enhancers"));
        assert!(ob.iter().all(|r| r.segment == "Occasional Browsers"));
        assert_eq!(ob.len(), 2100);
    }
}

#[test]
fn ids_are_contiguous_from_one() {
    let data = generate_full_customer_dataset(false);
    let ids: Vec<u32> = data.iter().map(|r| r.id).collect();
    let expected: Vec<u32> = (1..=7190).collect();
    assert_eq!(ids, expected);
}

#[test]
fn customer_ids_are_contiguous_per_segment() {
    let data = generate_full_customer_dataset(true);
    for profile in &SEGMENT_PROFILES {
        let block = segment_block(&data, profile.name);
        assert_eq!(block.len(), profile.count as usize);
        for (i, r) in block.iter().enumerate() {
            assert_eq!(r.customer_id, format!("{}-{:04}", profile.prefix, i + 1));
        }
    }
}

#[test]
fn every_record_respects_range_invariants() {
    for after in [false, true] {
        let scenario = Scenario::from_flag(after);
        for r in generate_full_customer_dataset(after) {
            assert!(
                (0.05..=0.85).contains(&r.predicted_churn_risk),
                "{}: churn {}",
                r.customer_id,
                r.predicted_churn_risk
            );
            assert!(r.actual_churn >= 0.03, "{}: actual {}", r.customer_id, r.actual_churn);
            assert!(r.clv >= 50, "{}: clv {}", r.customer_id, r.clv);
            assert!((5..=95).contains(&r.health_score));
            assert!((3..=23).contains(&r.total_orders));
            assert!((6..=54).contains(&r.tenure));
            assert!((0.5..=4.5).contains(&r.purchase_freq));

            let (base, width) = scenario.inactivity_span();
            assert!(r.days_inactive >= base as i64);
            assert!(r.days_inactive <= (base + width) as i64);

            // clv / [3, 7) rounds into this window.
            let lo = (r.clv as f64 / 7.0).floor() as i64;
            let hi = (r.clv as f64 / 3.0).ceil() as i64;
            assert!((lo..=hi).contains(&r.avg_order_value));
        }
    }
}

#[test]
fn churn_values_are_rounded() {
    for r in generate_full_customer_dataset(false).iter().take(500) {
        let cents = r.predicted_churn_risk * 100.0;
        assert!((cents - cents.round()).abs() < 1e-9);
        let tenths = r.purchase_freq * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9);
    }
}

#[test]
fn last_purchase_counts_back_from_scenario_anchor() {
    for after in [false, true] {
        let scenario = Scenario::from_flag(after);
        let anchor = scenario.anchor_date();
        for r in generate_full_customer_dataset(after).iter().step_by(97) {
            let date = chrono::NaiveDate::parse_from_str(&r.last_purchase, "%Y-%m-%d").unwrap();
            assert_eq!((anchor - date).num_days(), r.days_inactive);
        }
    }
}

#[test]
fn first_record_of_before_dataset() {
    let data = generate_full_customer_dataset(false);
    let first = &data[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.customer_id, "FH-0001");
    assert_eq!(first.segment, "Functional Homemakers");
}

#[test]
fn after_strategy_lowers_fh_churn_and_raises_health() {
    let before = generate_full_customer_dataset(false);
    let after = generate_full_customer_dataset(true);
    assert_eq!(before.len(), after.len());

    let fh_before = segment_block(&before, "Functional Homemakers");
    let fh_after = segment_block(&after, "Functional Homemakers");

    let churn_before = mean(fh_before.iter().map(|r| r.predicted_churn_risk));
    let churn_after = mean(fh_after.iter().map(|r| r.predicted_churn_risk));
    assert!(
        churn_after < churn_before,
        "FH churn after ({churn_after:.3}) should be below before ({churn_before:.3})"
    );

    let health_before = mean(fh_before.iter().map(|r| r.health_score as f64));
    let health_after = mean(fh_after.iter().map(|r| r.health_score as f64));
    assert!(
        health_after > health_before + 20.0,
        "FH health after ({health_after:.1}) should clearly exceed before ({health_before:.1})"
    );

    // Same seeds, shifted parameters: the shift holds record by record.
    for (b, a) in fh_before.iter().zip(fh_after.iter()) {
        assert!(a.predicted_churn_risk <= b.predicted_churn_risk, "{}", a.customer_id);
    }
}

#[test]
fn segment_means_track_their_parameters() {
    let data = generate_full_customer_dataset(false);
    for profile in &SEGMENT_PROFILES {
        let block = segment_block(&data, profile.name);
        let clv = mean(block.iter().map(|r| r.clv as f64));
        let expected = profile.before.clv_mean;
        assert!(
            (clv - expected).abs() < profile.before.clv_std,
            "{}: mean clv {clv:.1} too far from {expected}",
            profile.prefix
        );
    }
}

#[test]
fn summaries_follow_segment_order() {
    let data = generate_full_customer_dataset(true);
    let summaries = summarize_segments(&data);
    let prefixes: Vec<_> = summaries.iter().map(|s| s.prefix.as_str()).collect();
    assert_eq!(prefixes, ["FH", "HE", "OB"]);
    assert_eq!(summaries[0].count, 4200);
    assert_eq!(summaries[1].count, 890);
    assert_eq!(summaries[2].count, 2100);
    assert!(summaries[0].avg_health_score > 60.0);

    let empty = summarize_segments(&[]);
    assert!(empty.iter().all(|s| s.count == 0 && s.avg_clv == 0.0));
}

#[test]
fn pcg_source_keeps_the_same_contract() {
    let generator = DatasetGenerator::new(DrawSource::Pcg);
    assert_eq!(generator.source(), DrawSource::Pcg);
    assert_eq!(DatasetGenerator::default().source(), DrawSource::SineHash);
    let data = generator.generate(Scenario::Before);
    assert_eq!(data.len(), 7190);
    assert_eq!(data[0].customer_id, "FH-0001");
    assert!(data
        .iter()
        .all(|r| (0.05..=0.85).contains(&r.predicted_churn_risk) && r.clv >= 50));

    let sine = generate_full_customer_dataset(false);
    assert_ne!(data, sine, "draw sources should produce different values");
}

#[test]
fn records_serialize_with_camel_case_fields() {
    let data = generate_full_customer_dataset(false);
    let json = serde_json::to_value(&data[0]).unwrap();
    for key in [
        "id",
        "customerId",
        "segment",
        "predictedChurnRisk",
        "actualChurn",
        "clv",
        "healthScore",
        "purchaseFreq",
        "avgOrderValue",
        "daysInactive",
        "totalOrders",
        "tenure",
        "lastPurchase",
        "region",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json.as_object().unwrap().len(), 14);
}
