use chrono::{NaiveDate, NaiveDateTime};
use outage_device::{
    DeviceForest, DeviceRecord, MAX_RISK_NARRATIVES, RawDevice, RiskLevel,
    build_risk_narratives, calculate_device_risk_at, dedup_by_psr_id, device_score,
};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::HashSet;

const TYPES: &[&str] = &["0101", "0103", "0103001", "0201", "0203", "0305", "0311", "0338", "9999"];

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("date")
}

fn record(value: Value, affiliated: String) -> DeviceRecord {
    let raw: RawDevice = serde_json::from_value(value).expect("raw");
    DeviceRecord::from_raw(&raw, affiliated)
}

proptest! {
    #[test]
    fn score_is_bounded(fault in any::<i64>(), defect in any::<i64>(), hazard in any::<i64>()) {
        let score = device_score(fault, defect, hazard);
        prop_assert!(score <= 100);
        prop_assert!(score >= 10);
    }

    #[test]
    fn dedup_keeps_first_occurrence(ids in prop::collection::vec(0u8..6, 0..40)) {
        let items: Vec<Value> = ids
            .iter()
            .enumerate()
            .map(|(seq, id)| json!({ "psr_id": format!("P{id}"), "seq": seq }))
            .collect();
        let unique = dedup_by_psr_id(&items);

        let mut seen = HashSet::new();
        for item in &unique {
            prop_assert!(seen.insert(item["psr_id"].as_str().unwrap_or_default().to_string()));
        }
        prop_assert_eq!(seen.len(), ids.iter().collect::<HashSet<_>>().len());
        for item in unique {
            let first = items
                .iter()
                .find(|candidate| candidate["psr_id"] == item["psr_id"])
                .expect("present");
            prop_assert_eq!(&first["seq"], &item["seq"]);
        }
    }

    #[test]
    fn forest_partitions_devices(
        nodes in prop::collection::vec((0usize..TYPES.len(), prop::option::of(0u8..12)), 0..30)
    ) {
        let devices: Vec<DeviceRecord> = nodes
            .iter()
            .enumerate()
            .map(|(position, (kind, parent))| {
                record(
                    json!({ "psr_id": format!("D{position}"), "psrType": TYPES[*kind] }),
                    parent.map(|p| format!("D{p}")).unwrap_or_default(),
                )
            })
            .collect();
        let forest = DeviceForest::build(&devices);

        let mut placements = vec![0usize; devices.len()];
        for &root in &forest.roots {
            placements[root] += 1;
        }
        for &orphan in &forest.orphans {
            placements[orphan] += 1;
        }
        for (parent, children) in forest.children.iter().enumerate() {
            for &child in children {
                placements[child] += 1;
                prop_assert_eq!(&devices[child].affiliated_psr_id, &devices[parent].psr_id);
                prop_assert_ne!(child, parent);
            }
        }
        prop_assert!(placements.iter().all(|&count| count == 1));
    }

    #[test]
    fn classifier_is_total(
        kind in 0usize..TYPES.len(),
        run_time in prop_oneof![
            Just(String::new()),
            Just("2015-06-01 00:00:00".to_string()),
            "[0-9 :/-]{0,19}",
        ],
        history in 0usize..3,
    ) {
        let mut device = record(
            json!({
                "psr_id": "D1",
                "psrType": TYPES[kind],
                "start_time": run_time,
                "operate_date": run_time,
                "faultHistoryList": vec![json!({}); history],
            }),
            String::new(),
        );
        let assessment = calculate_device_risk_at(&mut device, now());
        prop_assert!(matches!(
            assessment.risk_level,
            RiskLevel::Yes | RiskLevel::No | RiskLevel::Unknown
        ));
        prop_assert!(assessment.score <= 100);
    }

    #[test]
    fn narratives_are_capped(count in 0usize..60) {
        let devices: Vec<DeviceRecord> = (0..count)
            .map(|position| {
                let mut device = record(
                    json!({
                        "psr_id": format!("D{position}"),
                        "psrType": "0305",
                        "start_time": format!("20{:02}-01-01 00:00:00", position % 100),
                        "faultList": [{ "faultStatus": "01" }],
                    }),
                    String::new(),
                );
                device.assessment = calculate_device_risk_at(&mut device, now());
                device
            })
            .collect();
        prop_assert!(build_risk_narratives(&devices).len() <= MAX_RISK_NARRATIVES);
    }
}
