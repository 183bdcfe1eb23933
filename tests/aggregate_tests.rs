//! Aggregation behavior tests.
//!
//! Covers the grouped-count contracts the charts depend on: first-seen key
//! order, empty-key exclusion, and the fixed duration-bucket partition.

use plantdash::aggregate::{DurationBucket, bucket_duration, distinct_values, group_count};
use plantdash::model::EventRecord;

fn event(
    event_type: &str,
    city: Option<&str>,
    machine: &str,
    duration_minutes: f64,
) -> EventRecord {
    EventRecord {
        id: 0,
        event_type: event_type.to_string(),
        machine_name: machine.to_string(),
        city: city.map(|c| c.to_string()),
        notes: None,
        description: None,
        timestamp: "2025-06-01T08:00:00".to_string(),
        duration_minutes: Some(duration_minutes),
    }
}

// ---------------------------------------------------------------------------
// group_count
// ---------------------------------------------------------------------------

#[test]
fn group_count_values_sum_to_keyed_record_count() {
    let records = vec![
        event("Jam", Some("Pune"), "M1", 10.0),
        event("Overheat", None, "M2", 20.0),
        event("Jam", Some("Delhi"), "M1", 30.0),
        event("Breakdown", None, "M3", 40.0),
    ];

    // Two records have no city; the city aggregate excludes them.
    let by_city = group_count(&records, |r| r.city.as_deref());
    let total: u64 = by_city.iter().map(|(_, c)| c).sum();
    assert_eq!(total as usize, records.len() - 2);

    // Every record has a type; nothing is excluded there.
    let by_type = group_count(&records, |r| Some(&r.event_type));
    let total: u64 = by_type.iter().map(|(_, c)| c).sum();
    assert_eq!(total as usize, records.len());
}

#[test]
fn worked_two_event_scenario() {
    let records = vec![
        event("Jam", Some("Pune"), "M1", 10.0),
        event("Jam", Some("Pune"), "M1", 200.0),
    ];

    assert_eq!(
        group_count(&records, |r| Some(&r.event_type)),
        vec![("Jam".to_string(), 2)]
    );
    assert_eq!(
        group_count(&records, |r| r.city.as_deref()),
        vec![("Pune".to_string(), 2)]
    );
    assert_eq!(
        bucket_duration(&records),
        vec![("Short".to_string(), 1), ("Long".to_string(), 1)]
    );
}

#[test]
fn group_count_is_deterministic_for_identical_input() {
    let records = vec![
        event("Jam", None, "M3", 1.0),
        event("Overheat", None, "M1", 1.0),
        event("Jam", None, "M2", 1.0),
    ];
    let first = group_count(&records, |r| Some(&r.event_type));
    let second = group_count(&records, |r| Some(&r.event_type));
    assert_eq!(first, second);
    assert_eq!(first[0].0, "Jam");
}

// ---------------------------------------------------------------------------
// Duration buckets
// ---------------------------------------------------------------------------

#[test]
fn duration_boundary_table() {
    assert_eq!(DurationBucket::classify(30.0).label(), "Short");
    assert_eq!(DurationBucket::classify(31.0).label(), "Medium");
    assert_eq!(DurationBucket::classify(120.0).label(), "Medium");
    assert_eq!(DurationBucket::classify(121.0).label(), "Long");
    assert_eq!(DurationBucket::classify(480.0).label(), "Long");
    assert_eq!(DurationBucket::classify(481.0).label(), "Extended");
}

#[test]
fn missing_duration_counts_as_short() {
    let mut record = event("Jam", None, "M1", 0.0);
    record.duration_minutes = None;
    assert_eq!(
        bucket_duration(&[record]),
        vec![("Short".to_string(), 1)]
    );
}

#[test]
fn buckets_keep_partition_order_regardless_of_input_order() {
    let records = vec![
        event("Jam", None, "M1", 600.0),
        event("Jam", None, "M1", 50.0),
        event("Jam", None, "M1", 10.0),
        event("Jam", None, "M1", 200.0),
    ];
    let buckets = bucket_duration(&records);
    let labels: Vec<&str> = buckets.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(labels, vec!["Short", "Medium", "Long", "Extended"]);
}

// ---------------------------------------------------------------------------
// distinct_values
// ---------------------------------------------------------------------------

#[test]
fn distinct_values_skip_empty_and_preserve_order() {
    let records = vec![
        event("Jam", Some("Pune"), "M2", 1.0),
        event("Jam", Some(""), "M9", 1.0),
        event("Jam", Some("Delhi"), "M2", 1.0),
        event("Jam", Some("Pune"), "M4", 1.0),
    ];
    assert_eq!(
        distinct_values(&records, |r| r.city.as_deref()),
        vec!["Pune", "Delhi"]
    );
    assert_eq!(
        distinct_values(&records, |r| Some(&r.machine_name)),
        vec!["M2", "M9", "M4"]
    );
}
