//! Query lifecycle orchestration.

use askviz_common::{resolve, ChartType, NormalizedResult, QueryError};
use tracing::debug;

use crate::client::Transport;

/// Owned request-lifecycle state: not started, in flight, or settled with
/// the latest result or error
///
/// `execute` takes `&mut self`, so a second request cannot start while one
/// is in flight and a settlement can never land on a cleared session; the
/// borrow checker enforces the single-request model.
#[derive(Debug, Default)]
pub struct QuerySession {
    result: Option<NormalizedResult>,
    error: Option<QueryError>,
    in_flight: bool,
    chart_override: Option<ChartType>,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one query to settlement
    ///
    /// A blank question settles as `EmptyQuestion` without touching the
    /// transport or the held result. The in-flight flag is cleared on every
    /// path; transport failures arrive as values, so settlement cannot be
    /// skipped by an unwinding failure.
    pub async fn execute<T: Transport>(&mut self, transport: &T, question: &str) {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            self.error = Some(QueryError::EmptyQuestion);
            return;
        }

        self.in_flight = true;
        self.error = None;

        let settled = match transport.send(trimmed).await {
            Ok(raw) => resolve(Some(&raw), trimmed),
            Err(err) => Err(err),
        };

        match settled {
            Ok(result) => {
                debug!(rows = result.records.len(), chart = %result.chart_type, "query settled");
                self.result = Some(result);
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err);
            }
        }
        self.in_flight = false;
    }

    /// Reset to not-started; the manual chart override survives
    pub fn clear(&mut self) {
        self.result = None;
        self.error = None;
    }

    /// Manual override if set, else the resolved type of the current result
    pub fn chart_type(&self) -> Option<ChartType> {
        self.chart_override
            .or_else(|| self.result.as_ref().map(|r| r.chart_type))
    }

    pub fn set_chart_override(&mut self, chart: ChartType) {
        self.chart_override = Some(chart);
    }

    pub fn clear_chart_override(&mut self) {
        self.chart_override = None;
    }

    pub fn result(&self) -> Option<&NormalizedResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&QueryError> {
        self.error.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askviz_common::RawResponse;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubTransport {
        outcome: Result<serde_json::Value, QueryError>,
        calls: AtomicUsize,
    }

    impl StubTransport {
        fn ok(body: serde_json::Value) -> Self {
            Self {
                outcome: Ok(body),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(err: QueryError) -> Self {
            Self {
                outcome: Err(err),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Transport for StubTransport {
        async fn send(&self, _question: &str) -> Result<RawResponse, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(body) => Ok(serde_json::from_value(body.clone()).unwrap()),
                Err(err) => Err(err.clone()),
            }
        }
    }

    fn records_body() -> serde_json::Value {
        json!({ "data": [{ "month": "Oct", "sales": 42 }], "chartType": "line" })
    }

    #[tokio::test]
    async fn test_empty_question_never_touches_transport() {
        let transport = StubTransport::ok(records_body());
        let mut session = QuerySession::new();

        session.execute(&transport, "   ").await;

        assert_eq!(session.error(), Some(&QueryError::EmptyQuestion));
        assert_eq!(transport.calls(), 0);
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn test_empty_question_keeps_previous_result() {
        let transport = StubTransport::ok(records_body());
        let mut session = QuerySession::new();

        session.execute(&transport, "sales by month").await;
        assert!(session.result().is_some());

        session.execute(&transport, "").await;
        assert!(session.result().is_some());
        assert_eq!(session.error(), Some(&QueryError::EmptyQuestion));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_success_settles_result_and_clears_error() {
        let failing = StubTransport::err(QueryError::Network);
        let mut session = QuerySession::new();
        session.execute(&failing, "q").await;
        assert_eq!(session.error(), Some(&QueryError::Network));

        let transport = StubTransport::ok(records_body());
        session.execute(&transport, "q").await;

        assert!(session.error().is_none());
        let result = session.result().unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.chart_type, ChartType::Line);
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn test_transport_error_clears_stale_result() {
        let transport = StubTransport::ok(records_body());
        let mut session = QuerySession::new();
        session.execute(&transport, "q").await;
        assert!(session.result().is_some());

        let failing = StubTransport::err(QueryError::Server("bad view".into()));
        session.execute(&failing, "q").await;

        assert!(session.result().is_none());
        assert_eq!(
            session.error(),
            Some(&QueryError::Server("bad view".into()))
        );
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn test_resolver_errors_settle_like_any_other() {
        let transport = StubTransport::ok(json!({ "data": [] }));
        let mut session = QuerySession::new();

        session.execute(&transport, "q").await;

        assert_eq!(session.error(), Some(&QueryError::NoResults));
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_clear_resets_to_not_started() {
        let transport = StubTransport::ok(records_body());
        let mut session = QuerySession::new();
        session.execute(&transport, "q").await;

        session.clear();

        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(session.chart_type().is_none());
    }

    #[tokio::test]
    async fn test_chart_override_wins_until_cleared() {
        let transport = StubTransport::ok(records_body());
        let mut session = QuerySession::new();
        session.execute(&transport, "q").await;
        assert_eq!(session.chart_type(), Some(ChartType::Line));

        session.set_chart_override(ChartType::Pie);
        assert_eq!(session.chart_type(), Some(ChartType::Pie));

        session.clear_chart_override();
        assert_eq!(session.chart_type(), Some(ChartType::Line));
    }

    #[tokio::test]
    async fn test_chart_override_survives_clear() {
        let transport = StubTransport::ok(records_body());
        let mut session = QuerySession::new();
        session.set_chart_override(ChartType::Area);
        session.execute(&transport, "q").await;

        session.clear();

        assert_eq!(session.chart_type(), Some(ChartType::Area));
    }
}
