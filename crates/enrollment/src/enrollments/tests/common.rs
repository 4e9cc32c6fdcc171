use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::age_groups::AgeGroupRegistry;
use crate::enrollments::{
    Enrollment, EnrollmentDraft, EnrollmentRequest, EnrollmentService, EnrollmentStore,
    EnrollmentWorker,
};
use crate::error::StoreError;
use crate::ident::RecordId;
use crate::memory::{MemoryAgeGroupStore, MemoryEnrollmentStore, MemoryQueue};
use crate::queue::{EnrollmentQueue, QueueError};

pub(super) const VALID_CPF: &str = "52998224725";
pub(super) const OTHER_VALID_CPF: &str = "11144477735";

pub(super) fn request(cpf: &str, age: u32) -> EnrollmentRequest {
    EnrollmentRequest {
        name: "Maria Souza".to_string(),
        cpf: cpf.to_string(),
        age,
    }
}

pub(super) struct Harness {
    pub(super) registry: Arc<AgeGroupRegistry<MemoryAgeGroupStore>>,
    pub(super) store: Arc<MemoryEnrollmentStore>,
    pub(super) queue: Arc<MemoryQueue>,
}

impl Harness {
    pub(super) fn new() -> Self {
        Self {
            registry: Arc::new(AgeGroupRegistry::new(Arc::new(
                MemoryAgeGroupStore::default(),
            ))),
            store: Arc::new(MemoryEnrollmentStore::default()),
            queue: Arc::new(MemoryQueue::new("enrollments")),
        }
    }

    pub(super) fn service(
        &self,
    ) -> EnrollmentService<MemoryAgeGroupStore, MemoryEnrollmentStore, MemoryQueue> {
        EnrollmentService::new(
            self.registry.clone(),
            self.store.clone(),
            self.queue.clone(),
        )
    }

    pub(super) fn worker(
        &self,
    ) -> EnrollmentWorker<MemoryAgeGroupStore, MemoryEnrollmentStore, MemoryQueue> {
        EnrollmentWorker::new(
            self.registry.clone(),
            self.store.clone(),
            self.queue.clone(),
        )
    }
}

pub(super) struct UnavailableEnrollmentStore;

#[async_trait]
impl EnrollmentStore for UnavailableEnrollmentStore {
    async fn insert(&self, _draft: EnrollmentDraft) -> Result<Enrollment, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn find_by_cpf(&self, _cpf: &str) -> Result<Option<Enrollment>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn find_by_id(&self, _id: &RecordId) -> Result<Option<Enrollment>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Enrollment>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Queue whose broker cannot be reached.
pub(super) struct UnreachableQueue;

#[async_trait]
impl EnrollmentQueue for UnreachableQueue {
    fn name(&self) -> &str {
        "enrollments"
    }

    async fn push(&self, _payload: String) -> Result<(), QueueError> {
        Err(QueueError::Unavailable("connection refused".to_string()))
    }

    async fn pop(&self) -> Result<String, QueueError> {
        Err(QueueError::Unavailable("connection refused".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
