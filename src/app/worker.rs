//! Background fetch jobs.
//!
//! Every network call runs on its own thread so the UI loop never blocks.
//! Each job is stamped with the generation that was current when it was
//! spawned; the app discards any outcome whose stamp is stale, which is
//! what keeps a slow response for one panel from ever touching another
//! panel's state.

use std::sync::mpsc::Sender;
use std::thread;

use crate::api::{ApiClient, RequestError};
use crate::app::tabs::Tab;
use crate::model::{AskAnswer, CosineComparison, EventRecord, SimilarEvent, UmapProjection};

// ---------------------------------------------------------------------------
// Jobs and outcomes
// ---------------------------------------------------------------------------

/// What to fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchJob {
    Events,
    Similarity { event_id: i64 },
    Cosine { event_id1: i64, event_id2: i64 },
    Ask { question: String },
    Umap,
    Logs,
}

/// Typed payload matching the job that produced it.
#[derive(Debug)]
pub enum FetchPayload {
    Events(Vec<EventRecord>),
    Similarity(Vec<SimilarEvent>),
    Cosine(Option<CosineComparison>),
    Ask(AskAnswer),
    Umap(UmapProjection),
    Logs(Vec<String>),
}

/// A completed fetch, stamped with its target tab and generation.
#[derive(Debug)]
pub struct FetchOutcome {
    pub tab: Tab,
    pub generation: u64,
    pub result: Result<FetchPayload, RequestError>,
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Run `job` on a background thread and deliver the stamped outcome.
///
/// A send failure means the UI is gone; the thread just exits.
pub fn spawn_fetch(
    client: ApiClient,
    tab: Tab,
    generation: u64,
    job: FetchJob,
    tx: Sender<FetchOutcome>,
) {
    thread::spawn(move || {
        let result = run_job(&client, job);
        let _ = tx.send(FetchOutcome {
            tab,
            generation,
            result,
        });
    });
}

fn run_job(client: &ApiClient, job: FetchJob) -> Result<FetchPayload, RequestError> {
    match job {
        FetchJob::Events => client.events().map(FetchPayload::Events),
        FetchJob::Similarity { event_id } => {
            client.similar_events(event_id).map(FetchPayload::Similarity)
        }
        FetchJob::Cosine {
            event_id1,
            event_id2,
        } => client
            .cosine_similarity(event_id1, event_id2)
            .map(FetchPayload::Cosine),
        FetchJob::Ask { question } => client.ask(&question).map(FetchPayload::Ask),
        FetchJob::Umap => client.umap().map(FetchPayload::Umap),
        FetchJob::Logs => client.logs().map(FetchPayload::Logs),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::trace::TraceLog;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn outcome_carries_stamp_even_on_failure() {
        // Unreachable backend: the outcome must still arrive, stamped, as a
        // transport error rather than a hung or panicked thread.
        let client = ApiClient::new(
            "http://127.0.0.1:1",
            Duration::from_millis(300),
            TraceLog::disabled(),
        );
        let (tx, rx) = mpsc::channel();
        spawn_fetch(client, Tab::Logs, 7, FetchJob::Logs, tx);

        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.tab, Tab::Logs);
        assert_eq!(outcome.generation, 7);
        assert!(outcome.result.is_err());
    }
}
