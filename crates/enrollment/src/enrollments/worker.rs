use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use super::domain::{Enrollment, EnrollmentDraft, EnrollmentStatus};
use super::message::EnrollmentMessage;
use super::repository::EnrollmentStore;
use crate::age_groups::{AgeGroupRegistry, AgeGroupStore};
use crate::cpf;
use crate::error::StoreError;
use crate::queue::{EnrollmentQueue, QueueError};

/// Single consumer turning queued requests into persisted enrollments.
///
/// Age membership is evaluated against the registry at dequeue time, so groups registered or
/// deleted after admission change the outcome. Queue and store failures end [`run`] with an
/// error; recovery is left to whatever supervises the process.
///
/// [`run`]: EnrollmentWorker::run
pub struct EnrollmentWorker<G, E, Q> {
    registry: Arc<AgeGroupRegistry<G>>,
    store: Arc<E>,
    queue: Arc<Q>,
    poll_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    Persisted(Enrollment),
    Discarded(DiscardReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    AgeOutOfRange { age: u32 },
    MalformedPayload(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<G, E, Q> EnrollmentWorker<G, E, Q>
where
    G: AgeGroupStore + 'static,
    E: EnrollmentStore + 'static,
    Q: EnrollmentQueue + 'static,
{
    pub fn new(registry: Arc<AgeGroupRegistry<G>>, store: Arc<E>, queue: Arc<Q>) -> Self {
        Self {
            registry,
            store,
            queue,
            poll_delay: Duration::ZERO,
        }
    }

    pub fn with_poll_delay(mut self, poll_delay: Duration) -> Self {
        self.poll_delay = poll_delay;
        self
    }

    /// Pop one message and persist or discard it.
    pub async fn process_next(&self) -> Result<WorkerOutcome, WorkerError> {
        let payload = self.queue.pop().await?;

        let message = match EnrollmentMessage::decode(&payload) {
            Ok(message) => message,
            Err(err) => {
                warn!(queue = self.queue.name(), error = %err, "enrollment discarded: malformed payload");
                return Ok(WorkerOutcome::Discarded(DiscardReason::MalformedPayload(
                    err.to_string(),
                )));
            }
        };

        let masked = cpf::mask(&message.cpf);
        if !self.registry.contains_age(message.age).await? {
            warn!(
                cpf = %masked,
                age = message.age,
                "enrollment discarded: age matches no registered group"
            );
            return Ok(WorkerOutcome::Discarded(DiscardReason::AgeOutOfRange {
                age: message.age,
            }));
        }

        let enrollment = self
            .store
            .insert(EnrollmentDraft {
                name: message.name,
                cpf: message.cpf,
                age: message.age,
                status: EnrollmentStatus::Completed,
            })
            .await?;
        info!(id = %enrollment.id, cpf = %masked, "enrollment persisted");
        Ok(WorkerOutcome::Persisted(enrollment))
    }

    /// Process messages until the queue closes or a dependency fails.
    pub async fn run(&self) -> Result<(), WorkerError> {
        info!(queue = self.queue.name(), "enrollment worker started");
        loop {
            if !self.poll_delay.is_zero() {
                tokio::time::sleep(self.poll_delay).await;
            }

            match self.process_next().await {
                Ok(_) => {}
                Err(WorkerError::Queue(QueueError::Closed)) => {
                    info!(queue = self.queue.name(), "queue closed, enrollment worker stopping");
                    return Ok(());
                }
                Err(err) => {
                    error!(error = %err, "enrollment worker stopping");
                    return Err(err);
                }
            }
        }
    }
}
