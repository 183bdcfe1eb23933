//! HTTP client for the manufacturing events backend.
//!
//! All traffic goes through one [`ApiClient`] built around a synchronous
//! `ureq` agent with a configured timeout. Each endpoint method performs the
//! request, unwraps the `{data: ...}` envelope, and returns the typed
//! payload. Failures are classified into the [`RequestError`] taxonomy so
//! panels can render transport problems, bad statuses, and malformed bodies
//! as inline messages instead of letting anything escape the UI loop.
//!
//! Every call is recorded (best-effort) in the JSONL request trace, see
//! [`trace`].

pub mod trace;

use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{
    AskAnswer, AskRequest, CosineComparison, CosineRequest, Envelope, EventRecord, SimilarEvent,
    SimilarityRequest, UmapProjection,
};
use trace::TraceLog;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// A failed API call, carrying the request path and the underlying cause.
///
/// Validation of user input happens in the panels before any network call
/// and never produces a `RequestError`; a backend `data: null` is a typed
/// result (`Option::None`), not an error.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network-level failure: DNS, connection refused, timeout.
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: Box<ureq::Transport>,
    },
    /// The backend answered with a non-success HTTP status.
    #[error("request to {path} returned HTTP {code}")]
    Status { path: String, code: u16 },
    /// The body was not valid JSON or did not match the expected envelope.
    #[error("response from {path} was not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RequestError {
    /// Short classification tag used in the request trace.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Transport { .. } => "transport",
            RequestError::Status { .. } => "status",
            RequestError::Parse { .. } => "parse",
        }
    }

    /// One-line message suitable for an inline panel error.
    pub fn panel_message(&self) -> String {
        match self {
            RequestError::Transport { path, .. } => {
                format!("Could not reach the backend ({path}). Is the API running?")
            }
            RequestError::Status { path, code } => {
                format!("Backend returned HTTP {code} for {path}.")
            }
            RequestError::Parse { path, .. } => {
                format!("Backend sent an unreadable response for {path}.")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous backend client.
///
/// Cheap to clone — the underlying agent is shared — so background fetch
/// threads each take their own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    trace: TraceLog,
}

impl ApiClient {
    /// Build a client for the given base URL and per-request timeout.
    pub fn new(base_url: &str, timeout: Duration, trace: TraceLog) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            trace,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -- Endpoints ----------------------------------------------------------

    /// `GET /events` — all event records.
    pub fn events(&self) -> Result<Vec<EventRecord>, RequestError> {
        let env: Envelope<Vec<EventRecord>> = self.get_json("/events")?;
        Ok(env.data)
    }

    /// `POST /similarity` — ranked neighbors of one event. Backend order is
    /// the ranking; callers must not re-sort.
    pub fn similar_events(&self, event_id: i64) -> Result<Vec<SimilarEvent>, RequestError> {
        let env: Envelope<Vec<SimilarEvent>> =
            self.post_json("/similarity", &SimilarityRequest { event_id })?;
        Ok(env.data)
    }

    /// `POST /cosine-similarity` — compare two events. `None` means the
    /// backend could not find one of the ids (distinct from a failure).
    pub fn cosine_similarity(
        &self,
        event_id1: i64,
        event_id2: i64,
    ) -> Result<Option<CosineComparison>, RequestError> {
        let env: Envelope<Option<CosineComparison>> = self.post_json(
            "/cosine-similarity",
            &CosineRequest {
                event_id1,
                event_id2,
            },
        )?;
        Ok(env.data)
    }

    /// `POST /ask-ai` — free-text question, markup answer.
    pub fn ask(&self, question: &str) -> Result<AskAnswer, RequestError> {
        let env: Envelope<AskAnswer> = self.post_json("/ask-ai", &AskRequest { question })?;
        Ok(env.data)
    }

    /// `GET /umap` — 2-D embedding projection with index-aligned labels.
    pub fn umap(&self) -> Result<UmapProjection, RequestError> {
        let env: Envelope<UmapProjection> = self.get_json("/umap")?;
        Ok(env.data)
    }

    /// `GET /logs` — raw backend log lines, verbatim.
    pub fn logs(&self) -> Result<Vec<String>, RequestError> {
        let env: Envelope<Vec<String>> = self.get_json("/logs")?;
        Ok(env.data)
    }

    // -- Plumbing -----------------------------------------------------------

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let result = self.agent.get(&url).call();
        self.finish("GET", path, started, result)
    }

    fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestError> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let result = self.agent.post(&url).send_json(body);
        self.finish("POST", path, started, result)
    }

    /// Classify the transport result, parse the body, and trace the call.
    fn finish<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        started: Instant,
        result: Result<ureq::Response, ureq::Error>,
    ) -> Result<T, RequestError> {
        let outcome = match result {
            Ok(response) => response.into_json::<T>().map_err(|source| RequestError::Parse {
                path: path.to_string(),
                source,
            }),
            Err(ureq::Error::Status(code, _)) => Err(RequestError::Status {
                path: path.to_string(),
                code,
            }),
            Err(ureq::Error::Transport(transport)) => Err(RequestError::Transport {
                path: path.to_string(),
                source: Box::new(transport),
            }),
        };

        let kind = match &outcome {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        self.trace.record(method, path, kind, started.elapsed());

        outcome
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_strips_trailing_slash() {
        let client = ApiClient::new(
            "http://localhost:8090/",
            Duration::from_secs(5),
            TraceLog::disabled(),
        );
        assert_eq!(client.base_url(), "http://localhost:8090");
    }

    #[test]
    fn transport_error_renders_panel_message() {
        // Port 1 is never listening; the call fails fast with a transport
        // error rather than a panic or a status error.
        let client = ApiClient::new(
            "http://127.0.0.1:1",
            Duration::from_millis(500),
            TraceLog::disabled(),
        );
        let err = client.events().unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(err.panel_message().contains("/events"));
    }
}
