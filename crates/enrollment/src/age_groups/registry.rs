use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::domain::{AgeGroup, AgeRange, InvalidRange};
use super::repository::AgeGroupStore;
use crate::error::{ErrorKind, StoreError};
use crate::ident::{InvalidIdentifier, RecordId};

/// Owns the non-overlap invariant over the stored age groups.
pub struct AgeGroupRegistry<S> {
    store: Arc<S>,
    // Serialises check-then-insert so concurrent registrations cannot both pass the overlap check.
    registration: Mutex<()>,
}

impl<S> AgeGroupRegistry<S>
where
    S: AgeGroupStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            registration: Mutex::new(()),
        }
    }

    /// Register `[min_age, max_age]`, refusing inverted ranges and any overlap.
    pub async fn register(&self, min_age: u32, max_age: u32) -> Result<AgeGroup, RegistryError> {
        let range = AgeRange::new(min_age, max_age)?;

        let _guard = self.registration.lock().await;
        if let Some(existing) = self.store.find_overlapping(range).await? {
            debug!(%existing, min_age, max_age, "age range rejected: overlap");
            return Err(RegistryError::Overlap { existing });
        }

        let group = self.store.insert(range).await?;
        info!(id = %group.id, min_age, max_age, "age group registered");
        Ok(group)
    }

    pub async fn list(&self) -> Result<Vec<AgeGroup>, RegistryError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), RegistryError> {
        let id = RecordId::parse(raw_id)?;
        if !self.store.delete(&id).await? {
            return Err(RegistryError::NotFound(id));
        }
        info!(%id, "age group removed");
        Ok(())
    }

    /// Whether `age` falls inside any registered group, read from the store on every call.
    pub async fn contains_age(&self, age: u32) -> Result<bool, StoreError> {
        self.store
            .find_containing(age)
            .await
            .map(|group| group.is_some())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),
    #[error("age range overlaps existing group {existing}")]
    Overlap { existing: AgeGroup },
    #[error("age group {0} not found")]
    NotFound(RecordId),
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistryError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::InvalidRange(_) => ErrorKind::Validation,
            RegistryError::Overlap { .. } => ErrorKind::Conflict,
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            RegistryError::Store(_) => ErrorKind::Unavailable,
        }
    }
}
