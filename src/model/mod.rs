//! Wire types for the manufacturing events backend.
//!
//! Every response arrives wrapped in a `{data: ...}` envelope, optionally
//! carrying a `meta` object the client ignores. These structs mirror the
//! backend JSON one-to-one; the client treats all of them as immutable,
//! read-only data for the lifetime of a single render cycle.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The `{data: ...}` envelope wrapping every backend response.
///
/// `T` is the per-endpoint payload. For `/cosine-similarity` the payload is
/// nullable (`Option<CosineComparison>`), which is how the backend signals
/// "no match" without an error status.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

// ---------------------------------------------------------------------------
// Event record
// ---------------------------------------------------------------------------

/// One manufacturing occurrence as the backend reports it.
///
/// Identity is `id` only. `duration_minutes` is a float on the wire and may
/// be absent; aggregation treats a missing duration as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub machine_name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
}

impl EventRecord {
    /// Duration in minutes, with missing values treated as zero.
    pub fn duration(&self) -> f64 {
        self.duration_minutes.unwrap_or(0.0)
    }

    /// Free-text body for display: `description`, falling back to `notes`.
    pub fn body_text(&self) -> &str {
        self.description
            .as_deref()
            .or(self.notes.as_deref())
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Similarity results
// ---------------------------------------------------------------------------

/// A neighbor event returned by `POST /similarity` — an event record plus
/// the backend-computed similarity score in `[0, 1]`.
///
/// The backend returns neighbors already ranked; the order of the array is
/// part of its contract and the client never re-sorts.
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarEvent {
    #[serde(flatten)]
    pub event: EventRecord,
    pub similarity: f64,
}

/// Result of `POST /cosine-similarity`: one score plus the two compared
/// records. The endpoint returns `data: null` when either id is unknown.
#[derive(Debug, Clone, Deserialize)]
pub struct CosineComparison {
    pub cosine_similarity: f64,
    pub event1: EventRecord,
    pub event2: EventRecord,
}

// ---------------------------------------------------------------------------
// Ask AI
// ---------------------------------------------------------------------------

/// Answer payload from `POST /ask-ai`. `summary` is an optional longer
/// report rendered below the conversational answer.
#[derive(Debug, Clone, Deserialize)]
pub struct AskAnswer {
    pub answer: String,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Request body for `POST /ask-ai`.
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

/// Request body for `POST /similarity`.
#[derive(Debug, Serialize)]
pub struct SimilarityRequest {
    pub event_id: i64,
}

/// Request body for `POST /cosine-similarity`.
#[derive(Debug, Serialize)]
pub struct CosineRequest {
    pub event_id1: i64,
    pub event_id2: i64,
}

// ---------------------------------------------------------------------------
// UMAP projection
// ---------------------------------------------------------------------------

/// 2-D embedding projection from `GET /umap`.
///
/// `points` and `labels` are index-aligned and the same length; point `i`
/// carries categorical label `labels[i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct UmapProjection {
    pub points: Vec<[f64; 2]>,
    pub labels: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_record_parses_with_optional_fields_missing() {
        let json = r#"{
            "id": 7,
            "event_type": "Jam",
            "machine_name": "M1",
            "timestamp": "2025-06-01T08:30:00"
        }"#;
        let ev: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(ev.id, 7);
        assert_eq!(ev.city, None);
        assert_eq!(ev.duration(), 0.0);
        assert_eq!(ev.body_text(), "");
    }

    #[test]
    fn body_text_prefers_description_over_notes() {
        let json = r#"{
            "id": 1,
            "event_type": "Jam",
            "machine_name": "M1",
            "timestamp": "2025-06-01T08:30:00",
            "notes": "paper jam",
            "description": "feeder misalignment"
        }"#;
        let ev: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(ev.body_text(), "feeder misalignment");
    }

    #[test]
    fn similar_event_flattens_record_fields() {
        let json = r#"{
            "id": 3,
            "event_type": "Overheat",
            "machine_name": "M2",
            "timestamp": "2025-06-02T10:00:00",
            "similarity": 0.8731
        }"#;
        let sim: SimilarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(sim.event.id, 3);
        assert!((sim.similarity - 0.8731).abs() < f64::EPSILON);
    }

    #[test]
    fn cosine_envelope_null_data_is_none() {
        let json = r#"{"data": null, "meta": {"error": "Events not found"}}"#;
        let env: Envelope<Option<CosineComparison>> = serde_json::from_str(json).unwrap();
        assert!(env.data.is_none());
    }
}
