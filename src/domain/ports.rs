use super::submission::{NewSubmission, Submission};
use super::weather::WeatherReport;
use crate::error::Result;
use async_trait::async_trait;

/// Append-only collection of contact-form submissions.
///
/// Implementations do not validate; callers hand over entries that already
/// passed the validator.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Stamps `entry` with the current time and adds it to the end of the
    /// collection, returning the stored record.
    async fn append(&self, entry: NewSubmission) -> Result<Submission>;
    /// Returns every stored submission, oldest first.
    async fn list(&self) -> Result<Vec<Submission>>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self) -> Result<WeatherReport>;
}

pub type MessageStoreBox = Box<dyn MessageStore>;
pub type MessageStoreFactory = Box<dyn Fn() -> MessageStoreBox + Send + Sync>;
pub type WeatherProviderBox = Box<dyn WeatherProvider>;
