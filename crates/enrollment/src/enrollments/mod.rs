//! Enrollment intake: synchronous admission, queued hand-off and asynchronous persistence.
//!
//! Admission validates and enqueues; the worker pops, re-checks the live age-group registry and
//! persists or discards. Duplicate CPFs are caught by an admission-time lookup only, so two
//! requests racing through admission before either is persisted can both be stored.

pub mod admission;
pub mod domain;
pub mod message;
pub mod repository;
pub mod router;
pub mod service;
pub mod worker;

#[cfg(test)]
mod tests;

pub use admission::{AdmissionError, EnrollmentAdmission};
pub use domain::{
    AcceptedEnrollment, Enrollment, EnrollmentDraft, EnrollmentRequest, EnrollmentStatus,
    PROCESSING_ID,
};
pub use message::{EnrollmentMessage, MessageError};
pub use repository::{EnrollmentDocument, EnrollmentStore};
pub use router::enrollment_router;
pub use service::{EnrollmentService, LookupError};
pub use worker::{DiscardReason, EnrollmentWorker, WorkerError, WorkerOutcome};
