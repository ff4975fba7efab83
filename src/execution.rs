//! Sequencing split statements into an execution backend
//!
//! The backend that actually talks to a database lives outside this crate.
//! It is modelled by [`StatementExecutor`]: it accepts one statement at a time
//! and reports what happened through [`ExecutionEvent`]s. A plain tabular
//! result is reported as `Schema`, `Data`, then `Complete`.
//!
//! [`run_script`] splits a script and feeds the statements to an executor in
//! order. It interprets nothing about the SQL or the backend's wire format.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::splitter::{split_statements_with, KeywordSet, StatementSpan};

/// Opaque identifier for one submitted statement, minted before submission
/// so the caller can cancel it out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryId(Uuid);

impl QueryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The raw UUID, for backends that tag server-side sessions or requests
    /// with it so a later [`StatementExecutor::cancel`] can find them.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A result column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub type_name: String,
}

/// One result row; `None` is SQL NULL
pub type Row = Vec<Option<String>>;

/// Streamed outcome of executing a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionEvent {
    Schema(Vec<Column>),
    Data(Vec<Row>),
    Complete { rows_affected: Option<u64> },
    Info(String),
    Error(String),
}

/// Failure reported by an executor, as opposed to an `Error` event the
/// database sent back for a statement.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Execution backend unavailable: {message}")]
    BackendUnavailable { message: String },

    #[error("Query {id} was cancelled")]
    Cancelled { id: QueryId },

    #[error("Query {id} failed: {message}")]
    QueryFailed { id: QueryId, message: String },
}

/// An execution backend that runs one statement at a time.
///
/// Methods take `&self` so an executor can be shared with the thread that
/// issues cancellations.
pub trait StatementExecutor {
    /// Run `query`, reporting its outcome through `sink`.
    fn execute(
        &self,
        id: QueryId,
        query: &str,
        sink: &mut dyn FnMut(ExecutionEvent),
    ) -> Result<(), ExecutionError>;

    /// Ask the backend to stop the statement running under `id`.
    fn cancel(&self, id: QueryId);
}

/// Cooperative cancellation shared between the runner and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for running a script
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub keywords: KeywordSet,
    /// Stop at the first failed statement instead of continuing
    pub stop_on_error: bool,
}

/// What happened to the statements of a script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Statements that ran to completion without an error
    pub succeeded: usize,
    pub failed: usize,
    /// Statements never submitted (cancelled, or skipped after a failure)
    pub not_run: usize,
    /// Ids of submitted statements, in submission order
    pub query_ids: Vec<QueryId>,
}

/// Split `text` and execute its statements in order, one at a time.
///
/// `on_event` sees every event together with the statement that produced it.
/// The cancel flag is checked before each submission; a statement that is
/// already running is the executor's to stop.
pub fn run_script<E, F>(
    text: &str,
    executor: &E,
    options: &RunOptions,
    cancel: &CancelFlag,
    mut on_event: F,
) -> ExecutionSummary
where
    E: StatementExecutor + ?Sized,
    F: FnMut(&StatementSpan<'_>, QueryId, ExecutionEvent),
{
    let spans = split_statements_with(text, &options.keywords);
    let mut summary = ExecutionSummary::default();

    for (index, span) in spans.iter().enumerate() {
        if cancel.is_cancelled() {
            debug!(remaining = spans.len() - index, "script cancelled");
            summary.not_run = spans.len() - index;
            break;
        }

        let id = QueryId::new();
        summary.query_ids.push(id);

        let mut reported_error = false;
        let result = executor.execute(id, span.query, &mut |event| {
            if matches!(event, ExecutionEvent::Error(_)) {
                reported_error = true;
            }
            on_event(span, id, event);
        });

        match result {
            Ok(()) if !reported_error => summary.succeeded += 1,
            Ok(()) => summary.failed += 1,
            Err(e) => {
                warn!(query_id = %id, start = span.start_position, "statement failed: {e}");
                summary.failed += 1;
                on_event(span, id, ExecutionEvent::Error(e.to_string()));
            }
        }

        if summary.failed > 0 && options.stop_on_error {
            summary.not_run = spans.len() - index - 1;
            break;
        }
    }

    summary
}
