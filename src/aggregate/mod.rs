//! Pure aggregation over event records.
//!
//! Folds a fetched batch of [`EventRecord`]s into the ordered grouped counts
//! the charts consume: by event type, city, machine, and duration bucket.
//! Everything here is synchronous, side-effect free, and deterministic given
//! identical input order — key order is first-seen insertion order held in a
//! `Vec`, never hash iteration order.

use std::collections::HashMap;

use crate::model::EventRecord;

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// Count records per key, preserving first-seen key order.
///
/// `key_fn` extracts the categorical key; records whose key is `None` or
/// empty are excluded from the output (e.g. events with no `city`).
pub fn group_count<F>(records: &[EventRecord], key_fn: F) -> Vec<(String, u64)>
where
    F: Fn(&EventRecord) -> Option<&str>,
{
    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(key) = key_fn(record) else { continue };
        if key.is_empty() {
            continue;
        }
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.to_string(), counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }

    counts
}

/// Ordered set of first-seen non-empty values for a key.
///
/// Used to build chart label axes and selection lists.
pub fn distinct_values<F>(records: &[EventRecord], key_fn: F) -> Vec<String>
where
    F: Fn(&EventRecord) -> Option<&str>,
{
    let mut values: Vec<String> = Vec::new();
    let mut seen: HashMap<String, ()> = HashMap::new();

    for record in records {
        let Some(value) = key_fn(record) else { continue };
        if value.is_empty() || seen.contains_key(value) {
            continue;
        }
        seen.insert(value.to_string(), ());
        values.push(value.to_string());
    }

    values
}

// ---------------------------------------------------------------------------
// Duration buckets
// ---------------------------------------------------------------------------

/// Fixed partition of `duration_minutes` into four intervals.
///
/// The boundaries (≤30, 31–120, 121–480, >480) are an asserted business
/// rule, not derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
    Extended,
}

impl DurationBucket {
    /// All buckets in partition order.
    pub const ALL: [DurationBucket; 4] = [
        DurationBucket::Short,
        DurationBucket::Medium,
        DurationBucket::Long,
        DurationBucket::Extended,
    ];

    /// Classify a duration in minutes. Missing durations are zero, which
    /// lands in `Short`.
    pub fn classify(minutes: f64) -> Self {
        if minutes <= 30.0 {
            DurationBucket::Short
        } else if minutes <= 120.0 {
            DurationBucket::Medium
        } else if minutes <= 480.0 {
            DurationBucket::Long
        } else {
            DurationBucket::Extended
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationBucket::Short => "Short",
            DurationBucket::Medium => "Medium",
            DurationBucket::Long => "Long",
            DurationBucket::Extended => "Extended",
        }
    }

    fn index(self) -> usize {
        match self {
            DurationBucket::Short => 0,
            DurationBucket::Medium => 1,
            DurationBucket::Long => 2,
            DurationBucket::Extended => 3,
        }
    }
}

/// Count records per duration bucket.
///
/// Output is in fixed partition order (Short, Medium, Long, Extended) with
/// zero-count buckets omitted, so it is deterministic regardless of input
/// order.
pub fn bucket_duration(records: &[EventRecord]) -> Vec<(String, u64)> {
    let mut counts = [0u64; 4];
    for record in records {
        counts[DurationBucket::classify(record.duration()).index()] += 1;
    }

    DurationBucket::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(bucket, count)| (bucket.label().to_string(), count))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event_type: &str, city: Option<&str>, machine: &str, minutes: f64) -> EventRecord {
        EventRecord {
            id: 0,
            event_type: event_type.to_string(),
            machine_name: machine.to_string(),
            city: city.map(|c| c.to_string()),
            notes: None,
            description: None,
            timestamp: "2025-06-01T08:00:00".to_string(),
            duration_minutes: Some(minutes),
        }
    }

    #[test]
    fn group_count_preserves_first_seen_order() {
        let records = vec![
            record("Jam", Some("Pune"), "M2", 10.0),
            record("Overheat", Some("Delhi"), "M1", 20.0),
            record("Jam", Some("Pune"), "M2", 30.0),
        ];
        let by_type = group_count(&records, |r| Some(&r.event_type));
        assert_eq!(
            by_type,
            vec![("Jam".to_string(), 2), ("Overheat".to_string(), 1)]
        );
    }

    #[test]
    fn group_count_excludes_missing_keys() {
        let records = vec![
            record("Jam", Some("Pune"), "M1", 10.0),
            record("Jam", None, "M1", 10.0),
        ];
        let by_city = group_count(&records, |r| r.city.as_deref());
        assert_eq!(by_city, vec![("Pune".to_string(), 1)]);

        // Counts sum to input length minus excluded records.
        let total: u64 = by_city.iter().map(|(_, c)| c).sum();
        assert_eq!(total as usize, records.len() - 1);
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(DurationBucket::classify(30.0), DurationBucket::Short);
        assert_eq!(DurationBucket::classify(31.0), DurationBucket::Medium);
        assert_eq!(DurationBucket::classify(120.0), DurationBucket::Medium);
        assert_eq!(DurationBucket::classify(121.0), DurationBucket::Long);
        assert_eq!(DurationBucket::classify(480.0), DurationBucket::Long);
        assert_eq!(DurationBucket::classify(481.0), DurationBucket::Extended);
        assert_eq!(DurationBucket::classify(0.0), DurationBucket::Short);
    }

    #[test]
    fn bucket_duration_treats_missing_as_short() {
        let mut rec = record("Jam", None, "M1", 0.0);
        rec.duration_minutes = None;
        let buckets = bucket_duration(&[rec]);
        assert_eq!(buckets, vec![("Short".to_string(), 1)]);
    }

    #[test]
    fn bucket_duration_fixed_order_skips_empty() {
        let records = vec![
            record("Jam", None, "M1", 500.0),
            record("Jam", None, "M1", 10.0),
            record("Jam", None, "M1", 600.0),
        ];
        let buckets = bucket_duration(&records);
        assert_eq!(
            buckets,
            vec![("Short".to_string(), 1), ("Extended".to_string(), 2)]
        );
    }

    #[test]
    fn distinct_values_ordered_and_deduplicated() {
        let records = vec![
            record("Jam", Some("Pune"), "M2", 1.0),
            record("Jam", Some("Delhi"), "M1", 1.0),
            record("Jam", Some("Pune"), "M3", 1.0),
        ];
        let machines = distinct_values(&records, |r| Some(&r.machine_name));
        assert_eq!(machines, vec!["M2", "M1", "M3"]);
    }
}
