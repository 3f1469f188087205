use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use biobank_client::transport::{unwrap_envelope, ApiRequest, Transport};
use biobank_client::ClientError;
use serde_json::Value;

enum Reply {
    Ok(Value),
    Err { status: u16, message: String },
}

/// In-memory [`Transport`] that records every request and answers from a
/// queue of canned replies, in order.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn reply(&self, body: Value) -> &Self {
        lock(&self.replies).push_back(Reply::Ok(body));
        self
    }

    /// Queue an error reply.
    pub fn fail(&self, status: u16, message: impl Into<String>) -> &Self {
        lock(&self.replies).push_back(Reply::Err {
            status,
            message: message.into(),
        });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Replies queued but not yet consumed.
    pub fn pending(&self) -> usize {
        lock(&self.replies).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        lock(&self.requests).push(request);
        match lock(&self.replies).pop_front() {
            Some(Reply::Ok(body)) => Ok(unwrap_envelope(body)),
            Some(Reply::Err { status, message }) => Err(ClientError::Api { status, message }),
            None => Err(ClientError::Api {
                status: 500,
                message: "no reply queued".to_string(),
            }),
        }
    }
}
