//! In-memory transport for tests and offline rendering

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use super::{Request, Response, Transport, TransportError};

/// Records every request and replies from a queue of canned results,
/// falling back to `200 {}` once the queue is empty.
pub struct StubTransport {
    queued: Mutex<VecDeque<Result<Response, TransportError>>>,
    fallback: Response,
    requests: Mutex<Vec<Request>>,
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl StubTransport {
    pub fn new() -> Self {
        Self::with_fallback(Response::new(200, b"{}".to_vec()))
    }

    /// Reply with `fallback` whenever nothing is queued
    pub fn with_fallback(fallback: Response) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response for the next unanswered request
    pub fn push_response(&self, response: Response) {
        lock(&self.queued).push_back(Ok(response));
    }

    /// Queue a transport failure for the next unanswered request
    pub fn push_error(&self, error: TransportError) {
        lock(&self.queued).push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<Request> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        lock(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        lock(&self.requests).push(request);

        let next = lock(&self.queued).pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
