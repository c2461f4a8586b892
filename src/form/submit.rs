//! Submission Controller
//!
//! Sends a validated record to its resource path and turns the response into
//! a [`SubmissionOutcome`]. Exactly one request per submit attempt; no retries.

use std::sync::Arc;

use super::state::{FormState, PendingSubmit};
use super::FormRecord;
use crate::client::{Request, Transport, TransportError};

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome<R> {
    /// Validation failed; nothing was sent
    NotSubmitted,
    /// The server accepted the record and returned its canonical form
    Saved(R),
    /// Transport failure or non-success status
    Failed,
}

impl<R> SubmissionOutcome<R> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmissionOutcome::Saved(_))
    }
}

/// Posts records over a [`Transport`]
#[derive(Clone)]
pub struct SubmissionController {
    transport: Arc<dyn Transport>,
}

impl SubmissionController {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Validate, send and apply the response to `state`
    pub async fn submit<R: FormRecord>(&self, state: &mut FormState<R>) -> SubmissionOutcome<R> {
        let Some(pending) = state.begin_submit() else {
            return SubmissionOutcome::NotSubmitted;
        };

        let result = self.send(&pending).await;
        state.finish_submit(result)
    }

    /// Send one snapshot. Any non-2xx status is a failure.
    ///
    /// An empty success body echoes the submitted record back.
    pub async fn send<R: FormRecord>(&self, pending: &PendingSubmit<R>) -> Result<R, TransportError> {
        let request = Request::post_json(R::RESOURCE, &pending.record)?;

        tracing::debug!(resource = R::RESOURCE, "Posting record");
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                body: response.text(),
            });
        }

        if response.body.is_empty() {
            return Ok(pending.record.clone());
        }

        response.parse_json()
    }
}

impl std::fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Customer, CustomerField};
    use crate::client::{Credentials, Method, Response, StubTransport};
    use crate::config::ValidationConfig;
    use crate::form::FormStatus;

    fn state(original: Customer) -> FormState<Customer> {
        FormState::new(
            original,
            Customer::validator(&ValidationConfig::default()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_request_configuration() {
        let transport = Arc::new(StubTransport::new());
        let controller = SubmissionController::new(transport.clone());
        let mut state = state(Customer::new("Ashley", "Smith", "1234567890"));

        controller.submit(&mut state).await;

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/customers");
        assert_eq!(request.credentials, Credentials::SameOrigin);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let transport = Arc::new(StubTransport::new());
        let controller = SubmissionController::new(transport.clone());
        let mut state = state(Customer::new("", "Smith", "1234567890"));

        let outcome = controller.submit(&mut state).await;

        assert_eq!(outcome, SubmissionOutcome::NotSubmitted);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(
            state.result(CustomerField::FirstName).message(),
            Some("First name is required")
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        for status in [400, 404, 422, 500, 503] {
            let transport = Arc::new(StubTransport::new());
            transport.push_response(Response::new(status, b"{}".to_vec()));
            let controller = SubmissionController::new(transport);
            let mut state = state(Customer::new("Ashley", "Smith", "1234567890"));

            assert_eq!(controller.submit(&mut state).await, SubmissionOutcome::Failed);
            assert_eq!(state.status(), FormStatus::Failed);
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_failure() {
        let transport = Arc::new(StubTransport::new());
        transport.push_response(Response::new(200, b"not json".to_vec()));
        let controller = SubmissionController::new(transport);
        let mut state = state(Customer::new("Ashley", "Smith", "1234567890"));

        assert_eq!(controller.submit(&mut state).await, SubmissionOutcome::Failed);
    }

    #[tokio::test]
    async fn test_empty_success_body_echoes_record() {
        let transport = Arc::new(StubTransport::new());
        transport.push_response(Response::new(204, Vec::new()));
        let controller = SubmissionController::new(transport);
        let original = Customer::new("Ashley", "Smith", "1234567890");
        let mut state = state(original.clone());

        assert_eq!(
            controller.submit(&mut state).await,
            SubmissionOutcome::Saved(original)
        );
    }

    #[tokio::test]
    async fn test_double_submit_each_sends_a_request() {
        let transport = Arc::new(StubTransport::new());
        transport.push_response(Response::json(201, &serde_json::json!({ "id": 1 })));
        transport.push_response(Response::new(500, Vec::new()));
        let controller = SubmissionController::new(transport.clone());
        let mut state = state(Customer::new("Ashley", "Smith", "1234567890"));

        let first = state.begin_submit().unwrap();
        let second = state.begin_submit().unwrap();

        let first_result = controller.send(&first).await;
        let second_result = controller.send(&second).await;

        // Responses applied in reverse order: the first request's success lands last
        state.finish_submit(second_result);
        let outcome = state.finish_submit(first_result);

        assert_eq!(transport.request_count(), 2);
        assert!(outcome.is_saved());
        assert_eq!(state.status(), FormStatus::Saved);
    }
}
