use async_trait::async_trait;

use super::domain::{AgeGroup, AgeRange};
use crate::error::StoreError;
use crate::ident::RecordId;

/// Backing collection for age groups (`age_groups`: `{_id, min_age, max_age}`).
#[async_trait]
pub trait AgeGroupStore: Send + Sync {
    /// Persist a new group; the store assigns the identifier.
    async fn insert(&self, range: AgeRange) -> Result<AgeGroup, StoreError>;

    /// Any stored group with `min_age <= range.max_age && max_age >= range.min_age`.
    async fn find_overlapping(&self, range: AgeRange) -> Result<Option<AgeGroup>, StoreError>;

    /// Any stored group with `min_age <= age <= max_age`.
    async fn find_containing(&self, age: u32) -> Result<Option<AgeGroup>, StoreError>;

    async fn find_all(&self) -> Result<Vec<AgeGroup>, StoreError>;

    /// Returns `false` when nothing matched.
    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError>;
}
