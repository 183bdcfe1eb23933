//! Wire-format tests against captured backend responses.
//!
//! The JSON bodies here mirror what the events API actually serves,
//! including the `meta` object the client ignores.

use plantdash::model::{
    AskAnswer, CosineComparison, Envelope, EventRecord, SimilarEvent, UmapProjection,
};

#[test]
fn events_envelope_parses() {
    let body = r#"{
        "data": [
            {
                "id": 1,
                "event_type": "Jam",
                "machine_name": "Extruder-1",
                "notes": "paper jam at feeder",
                "timestamp": "2025-05-14T08:30:00",
                "city": "Pune",
                "duration_minutes": 42.5,
                "embedding": [0.1, 0.2]
            },
            {
                "id": 2,
                "event_type": "Overheat",
                "machine_name": "Press-3",
                "notes": null,
                "timestamp": "2025-05-14T09:10:00",
                "city": "Delhi",
                "duration_minutes": 500
            }
        ],
        "meta": {"count": 2, "timestamp": 1747208000.0}
    }"#;

    let env: Envelope<Vec<EventRecord>> = serde_json::from_str(body).unwrap();
    assert_eq!(env.data.len(), 2);
    assert_eq!(env.data[0].city.as_deref(), Some("Pune"));
    assert_eq!(env.data[0].duration(), 42.5);
    assert_eq!(env.data[1].notes, None);
}

#[test]
fn similarity_envelope_parses_with_scores() {
    let body = r#"{
        "data": [
            {
                "id": 9,
                "event_type": "Jam",
                "machine_name": "Extruder-1",
                "notes": "repeat jam",
                "timestamp": "2025-05-10T11:00:00",
                "city": "Pune",
                "duration_minutes": 15,
                "similarity": 0.9312
            }
        ],
        "meta": {"count": 1}
    }"#;

    let env: Envelope<Vec<SimilarEvent>> = serde_json::from_str(body).unwrap();
    assert_eq!(env.data[0].event.id, 9);
    assert!((env.data[0].similarity - 0.9312).abs() < 1e-9);
}

#[test]
fn cosine_envelope_parses_both_shapes() {
    let found = r#"{
        "data": {
            "cosine_similarity": 0.77,
            "event1": {
                "id": 3,
                "event_type": "Jam",
                "machine_name": "M1",
                "timestamp": "2025-05-01T10:00:00",
                "description": "feeder misalignment"
            },
            "event2": {
                "id": 3,
                "event_type": "Jam",
                "machine_name": "M1",
                "timestamp": "2025-05-01T10:00:00",
                "description": "feeder misalignment"
            }
        },
        "meta": {"timestamp": 1747208000.0}
    }"#;
    let env: Envelope<Option<CosineComparison>> = serde_json::from_str(found).unwrap();
    let comparison = env.data.unwrap();
    // Comparing an event to itself is a valid request.
    assert_eq!(comparison.event1.id, comparison.event2.id);
    assert!((comparison.cosine_similarity - 0.77).abs() < 1e-9);

    let not_found = r#"{"data": null, "meta": {"error": "Events not found"}}"#;
    let env: Envelope<Option<CosineComparison>> = serde_json::from_str(not_found).unwrap();
    assert!(env.data.is_none());
}

#[test]
fn ask_envelope_parses_with_and_without_summary() {
    let with_summary = r#"{
        "data": {"answer": "Three jams this week.", "summary": "<table>...</table>"},
        "meta": {"confidence": 0.8}
    }"#;
    let env: Envelope<AskAnswer> = serde_json::from_str(with_summary).unwrap();
    assert_eq!(env.data.answer, "Three jams this week.");
    assert!(env.data.summary.is_some());

    let bare = r#"{"data": {"answer": "All clear."}, "meta": {}}"#;
    let env: Envelope<AskAnswer> = serde_json::from_str(bare).unwrap();
    assert!(env.data.summary.is_none());
}

#[test]
fn umap_envelope_parses_index_aligned_arrays() {
    let body = r#"{
        "data": {
            "points": [[0.5, -1.25], [3.0, 2.0]],
            "labels": ["Jam", "Overheat"]
        }
    }"#;
    let env: Envelope<UmapProjection> = serde_json::from_str(body).unwrap();
    assert_eq!(env.data.points.len(), env.data.labels.len());
    assert_eq!(env.data.points[0], [0.5, -1.25]);
}
