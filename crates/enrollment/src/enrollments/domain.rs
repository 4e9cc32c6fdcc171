use serde::{Deserialize, Serialize};

use crate::ident::RecordId;

/// Identifier reported for accepted requests that have not been persisted yet.
pub const PROCESSING_ID: &str = "processing";

/// Client submitted enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub name: String,
    pub cpf: String,
    pub age: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Pending,
    #[default]
    Completed,
}

impl EnrollmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Completed => "completed",
        }
    }
}

/// Persisted enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: RecordId,
    pub name: String,
    pub cpf: String,
    pub age: u32,
    pub status: EnrollmentStatus,
}

/// Enrollment ready for insertion; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentDraft {
    pub name: String,
    pub cpf: String,
    pub age: u32,
    pub status: EnrollmentStatus,
}

/// Response for an admitted request. `id` is always [`PROCESSING_ID`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedEnrollment {
    pub id: &'static str,
    pub name: String,
    pub cpf: String,
    pub age: u32,
    pub status: EnrollmentStatus,
}

impl AcceptedEnrollment {
    pub(crate) fn processing(name: String, cpf: String, age: u32) -> Self {
        Self {
            id: PROCESSING_ID,
            name,
            cpf,
            age,
            status: EnrollmentStatus::Pending,
        }
    }
}
