use crate::domain::ports::MessageStore;
use crate::domain::submission::{NewSubmission, Submission};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory message store.
///
/// Uses `Arc<RwLock<Vec<Submission>>>` so clones share one collection.
/// Contents live as long as the process; nothing is written to disk.
#[derive(Default, Clone)]
pub struct InMemoryMessageStore {
    messages: Arc<RwLock<Vec<Submission>>>,
}

impl InMemoryMessageStore {
    /// Creates a new, empty in-memory message store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, entry: NewSubmission) -> Result<Submission> {
        let mut messages = self.messages.write().await;
        let submission = Submission::stamp(entry, Utc::now());
        messages.push(submission.clone());
        Ok(submission)
    }

    async fn list(&self) -> Result<Vec<Submission>> {
        let messages = self.messages.read().await;
        Ok(messages.clone())
    }
}
