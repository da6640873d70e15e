use super::*;
use crate::error::LookupError;
use crate::record::CountryRecord;
use crate::state::LOOKUP_FAILED_MESSAGE;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

fn record(name: &str, cca3: &str) -> CountryRecord {
    serde_json::from_value(serde_json::json!({ "name": { "common": name }, "cca3": cca3 })).unwrap()
}

/// Answers from a fixed table and remembers every query it was asked.
#[derive(Default)]
struct RecordingSource {
    responses: HashMap<String, Vec<CountryRecord>>,
    malformed: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingSource {
    fn with(mut self, query: &str, records: Vec<CountryRecord>) -> Self {
        self.responses.insert(query.to_string(), records);
        self
    }

    fn malformed(mut self, query: &str) -> Self {
        self.malformed.push(query.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CountrySource for RecordingSource {
    async fn lookup_by_name(&self, query: &SearchQuery) -> Result<Vec<CountryRecord>, LookupError> {
        self.calls.lock().unwrap().push(query.as_str().to_string());

        if self.malformed.iter().any(|q| q == query.as_str()) {
            let err = serde_json::from_str::<Vec<CountryRecord>>("{").unwrap_err();
            return Err(LookupError::Decode(err));
        }

        self.responses.get(query.as_str()).cloned().ok_or_else(|| LookupError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: r#"{"status":404,"message":"Not Found"}"#.to_string(),
        })
    }
}

fn submitter(source: RecordingSource) -> QuerySubmitter<RecordingSource> {
    QuerySubmitter::new(source, Denylist::default())
}

#[tokio::test]
async fn blocked_terms_never_reach_the_source() {
    let submitter = submitter(RecordingSource::default());

    for raw in ["israel", "Israel", "  ISRAEL  ", "\tIsRaEl\n"] {
        assert_eq!(submitter.submit(raw).await, ResultState::Blocked, "input {raw:?}");
    }
    assert!(submitter.source().calls().is_empty());
}

#[tokio::test]
async fn one_request_with_normalized_query() {
    let source = RecordingSource::default().with("new zealand", vec![record("New Zealand", "NZL")]);
    let submitter = submitter(source);

    let state = submitter.submit("  New Zealand ").await;

    assert_eq!(state.records().len(), 1);
    assert_eq!(submitter.source().calls(), vec!["new zealand".to_string()]);
}

#[tokio::test]
async fn loaded_keeps_response_order() {
    let records = vec![record("Guinea", "GIN"), record("Equatorial Guinea", "GNQ"), record("Guinea-Bissau", "GNB")];
    let submitter = submitter(RecordingSource::default().with("guinea", records.clone()));

    assert_eq!(submitter.submit("Guinea").await, ResultState::Loaded(records));
}

#[tokio::test]
async fn empty_success_is_loaded_not_error() {
    let submitter = submitter(RecordingSource::default().with("nothing", vec![]));
    assert_eq!(submitter.submit("nothing").await, ResultState::Loaded(vec![]));
}

#[tokio::test]
async fn not_found_becomes_fixed_error() {
    let submitter = submitter(RecordingSource::default());

    let state = submitter.submit("xyzxyz").await;

    assert_eq!(state.error_message(), Some(LOOKUP_FAILED_MESSAGE));
    assert!(state.records().is_empty());
    assert_eq!(submitter.source().calls(), vec!["xyzxyz".to_string()]);
}

#[tokio::test]
async fn malformed_body_becomes_same_error() {
    let submitter = submitter(RecordingSource::default().malformed("peru"));
    assert_eq!(submitter.submit("Peru").await, ResultState::Error(LOOKUP_FAILED_MESSAGE.to_string()));
}

#[tokio::test]
async fn blank_input_is_looked_up_and_fails() {
    let submitter = submitter(RecordingSource::default());

    let state = submitter.submit("   ").await;

    assert_eq!(state, ResultState::Error(LOOKUP_FAILED_MESSAGE.to_string()));
    assert_eq!(submitter.source().calls(), vec![String::new()]);
}

#[tokio::test]
async fn repeated_submissions_are_not_cached() {
    let submitter = submitter(RecordingSource::default().with("chile", vec![record("Chile", "CHL")]));

    submitter.submit("chile").await;
    submitter.submit("Chile").await;

    assert_eq!(submitter.source().calls(), vec!["chile".to_string(), "chile".to_string()]);
}

#[tokio::test]
async fn custom_denylist_replaces_default() {
    let submitter = QuerySubmitter::new(
        RecordingSource::default().with("israel", vec![record("Israel", "ISR")]),
        Denylist::from_terms(["Atlantis"]),
    );

    assert_eq!(submitter.submit("atlantis").await, ResultState::Blocked);
    assert_eq!(submitter.submit("Israel").await.records().len(), 1);
    assert_eq!(submitter.source().calls(), vec!["israel".to_string()]);
}

#[tokio::test]
async fn session_replaces_whole_state() {
    let source = RecordingSource::default().with("peru", vec![record("Peru", "PER")]);
    let session = SearchSession::new(submitter(source));
    assert_eq!(session.current(), ResultState::Empty);

    session.submit("peru").await;
    assert_eq!(session.current().records().len(), 1);

    session.submit("israel").await;
    assert_eq!(session.current(), ResultState::Blocked);
    assert!(session.current().records().is_empty());

    session.submit("xyzxyz").await;
    assert_eq!(session.current().error_message(), Some(LOOKUP_FAILED_MESSAGE));

    session.submit("peru").await;
    assert_eq!(session.current().error_message(), None);
}

#[test]
fn stale_ticket_is_discarded() {
    let session = SearchSession::new(submitter(RecordingSource::default()));

    let first = session.begin();
    let second = session.begin();
    assert!(second > first);

    let newer = ResultState::Loaded(vec![record("Chile", "CHL")]);
    assert_eq!(session.complete(second, newer.clone()), Submission::Applied(newer.clone()));
    assert_eq!(session.complete(first, ResultState::lookup_failed()), Submission::Stale(first));
    assert_eq!(session.current(), newer);
}

/// Holds each lookup until the test releases it.
struct GatedSource {
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

#[async_trait]
impl CountrySource for GatedSource {
    async fn lookup_by_name(&self, query: &SearchQuery) -> Result<Vec<CountryRecord>, LookupError> {
        let gate = self.gates.lock().unwrap().remove(query.as_str());
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(vec![record(query.as_str(), &query.as_str().to_uppercase())])
    }
}

#[tokio::test]
async fn slow_older_response_does_not_clobber_newer() {
    let (release_old, old_gate) = oneshot::channel();
    let (release_new, new_gate) = oneshot::channel();
    let gates = HashMap::from([("per".to_string(), old_gate), ("chl".to_string(), new_gate)]);
    let session = Arc::new(SearchSession::new(submitter_with(GatedSource { gates: Mutex::new(gates) })));

    let expected = ResultState::Loaded(vec![record("chl", "CHL")]);
    let controller = {
        let session = Arc::clone(&session);
        let expected = expected.clone();
        async move {
            let _ = release_new.send(());
            while session.current() != expected {
                tokio::task::yield_now().await;
            }
            let _ = release_old.send(());
        }
    };

    let (old, new, ()) = tokio::join!(session.submit("PER"), session.submit("CHL"), controller);

    assert_eq!(new, Submission::Applied(expected.clone()));
    assert!(matches!(old, Submission::Stale(_)), "got {old:?}");
    assert_eq!(session.current(), expected);
}

fn submitter_with<S: CountrySource>(source: S) -> QuerySubmitter<S> {
    QuerySubmitter::new(source, Denylist::default())
}
