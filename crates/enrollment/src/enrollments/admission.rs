use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{AcceptedEnrollment, EnrollmentRequest};
use super::message::EnrollmentMessage;
use super::repository::EnrollmentStore;
use crate::age_groups::{AgeGroupRegistry, AgeGroupStore};
use crate::cpf;
use crate::error::{ErrorKind, StoreError};
use crate::queue::{EnrollmentQueue, QueueError};

/// Synchronous validate-and-enqueue path.
///
/// Each check short-circuits; exactly one message is enqueued on success and none otherwise.
pub struct EnrollmentAdmission<G, E, Q> {
    registry: Arc<AgeGroupRegistry<G>>,
    store: Arc<E>,
    queue: Arc<Q>,
}

impl<G, E, Q> EnrollmentAdmission<G, E, Q>
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
        }
    }

    pub async fn admit(
        &self,
        request: EnrollmentRequest,
    ) -> Result<AcceptedEnrollment, AdmissionError> {
        let EnrollmentRequest {
            name,
            cpf: raw_cpf,
            age,
        } = request;

        let Some(cpf) = cpf::normalize(&raw_cpf) else {
            debug!(age, "enrollment rejected: invalid CPF");
            return Err(AdmissionError::InvalidCpf);
        };
        let masked = cpf::mask(&cpf);

        if !self.registry.contains_age(age).await? {
            debug!(cpf = %masked, age, "enrollment rejected: no matching age group");
            return Err(AdmissionError::AgeOutOfRange(age));
        }

        if self.store.find_by_cpf(&cpf).await?.is_some() {
            debug!(cpf = %masked, "enrollment rejected: duplicate CPF");
            return Err(AdmissionError::DuplicateCpf(masked));
        }

        let message = EnrollmentMessage { name, cpf, age };
        let payload = message.encode().map_err(AdmissionError::Encode)?;
        if let Err(err) = self.queue.push(payload).await {
            warn!(cpf = %masked, queue = self.queue.name(), error = %err, "enqueue failed");
            return Err(AdmissionError::Queue(err));
        }

        info!(cpf = %masked, age, queue = self.queue.name(), "enrollment queued");
        let EnrollmentMessage { name, cpf, age } = message;
        Ok(AcceptedEnrollment::processing(name, cpf, age))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error("invalid CPF")]
    InvalidCpf,
    #[error("age {0} matches no registered group")]
    AgeOutOfRange(u32),
    #[error("duplicate CPF: an enrollment for {0} already exists")]
    DuplicateCpf(String),
    #[error("cannot verify enrollment now, retry later")]
    Store(#[from] StoreError),
    #[error("cannot process enrollment now, retry later")]
    Queue(#[from] QueueError),
    #[error("cannot encode enrollment message")]
    Encode(#[source] serde_json::Error),
}

impl AdmissionError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            AdmissionError::InvalidCpf | AdmissionError::AgeOutOfRange(_) => ErrorKind::Validation,
            AdmissionError::DuplicateCpf(_) => ErrorKind::Conflict,
            AdmissionError::Store(_) | AdmissionError::Queue(_) | AdmissionError::Encode(_) => {
                ErrorKind::Unavailable
            }
        }
    }
}
