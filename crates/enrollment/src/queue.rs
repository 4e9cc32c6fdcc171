use async_trait::async_trait;

/// FIFO channel between admission and the worker carrying serialized messages.
#[async_trait]
pub trait EnrollmentQueue: Send + Sync {
    fn name(&self) -> &str;

    /// Append a payload at the tail.
    async fn push(&self, payload: String) -> Result<(), QueueError>;

    /// Wait for and remove the payload at the head.
    async fn pop(&self) -> Result<String, QueueError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("queue unavailable: {0}")]
    Unavailable(String),
    #[error("queue closed")]
    Closed,
}
