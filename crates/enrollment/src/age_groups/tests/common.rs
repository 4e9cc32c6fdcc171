use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::age_groups::{AgeGroup, AgeGroupRegistry, AgeGroupStore, AgeRange};
use crate::error::StoreError;
use crate::ident::RecordId;
use crate::memory::MemoryAgeGroupStore;

pub(super) fn registry() -> AgeGroupRegistry<MemoryAgeGroupStore> {
    AgeGroupRegistry::new(Arc::new(MemoryAgeGroupStore::default()))
}

pub(super) struct UnavailableStore;

#[async_trait]
impl AgeGroupStore for UnavailableStore {
    async fn insert(&self, _range: AgeRange) -> Result<AgeGroup, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn find_overlapping(&self, _range: AgeRange) -> Result<Option<AgeGroup>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn find_containing(&self, _age: u32) -> Result<Option<AgeGroup>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn find_all(&self) -> Result<Vec<AgeGroup>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn delete(&self, _id: &RecordId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
