use crate::config::ListOrder;
use crate::domain::ports::MessageStoreBox;
use crate::domain::submission::{ContactRequest, NewSubmission, Submission};
use crate::error::{PortfolioError, Result};
use tracing::{info, warn};

/// Entry point for contact-form traffic.
///
/// `ContactService` is the single place where submissions are validated. It
/// owns the message store and applies the configured list order.
pub struct ContactService {
    store: MessageStoreBox,
    order: ListOrder,
}

impl ContactService {
    /// Creates a new `ContactService`.
    ///
    /// # Arguments
    ///
    /// * `store` - The backend holding submissions.
    /// * `order` - The order `messages` returns them in.
    pub fn new(store: MessageStoreBox, order: ListOrder) -> Self {
        Self { store, order }
    }

    /// Validates `request` and appends it.
    ///
    /// Nothing is written when any field fails validation.
    pub async fn submit(&self, request: ContactRequest) -> Result<Submission> {
        let entry = NewSubmission::try_from(request).map_err(|errors| {
            warn!(
                fields = ?errors.keys().collect::<Vec<_>>(),
                "rejected contact submission"
            );
            PortfolioError::Validation(errors)
        })?;

        let submission = self.store.append(entry).await?;
        info!(timestamp = %submission.timestamp, "stored contact submission");
        Ok(submission)
    }

    /// Returns all stored submissions in the configured order.
    pub async fn messages(&self) -> Result<Vec<Submission>> {
        let mut messages = self.store.list().await?;
        if self.order == ListOrder::Newest {
            messages.reverse();
        }
        Ok(messages)
    }
}
