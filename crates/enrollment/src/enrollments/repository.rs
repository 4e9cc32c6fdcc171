use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{Enrollment, EnrollmentDraft, EnrollmentStatus};
use crate::error::StoreError;
use crate::ident::RecordId;

/// Backing collection for completed enrollments (`enrollments`).
///
/// No uniqueness constraint on `cpf` is required of implementations.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn insert(&self, draft: EnrollmentDraft) -> Result<Enrollment, StoreError>;
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Enrollment>, StoreError>;
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Enrollment>, StoreError>;
    async fn find_all(&self) -> Result<Vec<Enrollment>, StoreError>;
}

/// Stored document shape: `{_id, name, cpf, age, status?}`.
///
/// Documents written before statuses existed have no `status` and read back as completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentDocument {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    pub cpf: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnrollmentStatus>,
}

impl EnrollmentDocument {
    pub fn from_draft(id: RecordId, draft: EnrollmentDraft) -> Self {
        Self {
            id,
            name: draft.name,
            cpf: draft.cpf,
            age: draft.age,
            status: Some(draft.status),
        }
    }
}

impl From<EnrollmentDocument> for Enrollment {
    fn from(document: EnrollmentDocument) -> Self {
        Self {
            id: document.id,
            name: document.name,
            cpf: document.cpf,
            age: document.age,
            status: document.status.unwrap_or_default(),
        }
    }
}
