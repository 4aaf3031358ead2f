use async_trait::async_trait;

pub mod telegram;

pub use telegram::TelegramNotifier;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The request URL carries the bot token, so it is stripped before the error is stored.
    #[error("failed to send notification: {0}")]
    Http(reqwest::Error),

    #[error("notification endpoint returned non-200 status: status={status}, body={body:?}")]
    Status { status: reqwest::StatusCode, body: String },
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Http(err.without_url())
    }
}

/// Delivers a Markdown formatted text to the configured destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}
