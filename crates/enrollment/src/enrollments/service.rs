use std::sync::Arc;

use super::admission::{AdmissionError, EnrollmentAdmission};
use super::domain::{AcceptedEnrollment, Enrollment, EnrollmentRequest};
use super::repository::EnrollmentStore;
use crate::age_groups::{AgeGroupRegistry, AgeGroupStore};
use crate::error::{ErrorKind, StoreError};
use crate::ident::{InvalidIdentifier, RecordId};
use crate::queue::EnrollmentQueue;

/// Facade over admission and enrollment lookups used by the HTTP layer.
pub struct EnrollmentService<G, E, Q> {
    admission: EnrollmentAdmission<G, E, Q>,
    store: Arc<E>,
}

impl<G, E, Q> EnrollmentService<G, E, Q>
where
    G: AgeGroupStore + 'static,
    E: EnrollmentStore + 'static,
    Q: EnrollmentQueue + 'static,
{
    pub fn new(registry: Arc<AgeGroupRegistry<G>>, store: Arc<E>, queue: Arc<Q>) -> Self {
        Self {
            admission: EnrollmentAdmission::new(registry, store.clone(), queue),
            store,
        }
    }

    pub async fn admit(
        &self,
        request: EnrollmentRequest,
    ) -> Result<AcceptedEnrollment, AdmissionError> {
        self.admission.admit(request).await
    }

    /// Look up a persisted enrollment and its processing status.
    pub async fn status(&self, raw_id: &str) -> Result<Enrollment, LookupError> {
        let id = RecordId::parse(raw_id)?;
        self.store
            .find_by_id(&id)
            .await?
            .ok_or(LookupError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Enrollment>, LookupError> {
        Ok(self.store.find_all().await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
    #[error("enrollment {0} not found")]
    NotFound(RecordId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LookupError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            LookupError::NotFound(_) => ErrorKind::NotFound,
            LookupError::Store(_) => ErrorKind::Unavailable,
        }
    }
}
