use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// A subscription or calculation was cancelled a second time.
    #[error("ALREADY_UNSUBSCRIBED")]
    AlreadyUnsubscribed,
}

impl StoreError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::AlreadyUnsubscribed => "canceled_subscription",
        }
    }
}
