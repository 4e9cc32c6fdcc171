//! Age-group registry and asynchronous enrollment intake.
//!
//! Requests are validated synchronously by [`enrollments::EnrollmentAdmission`], handed to an
//! [`queue::EnrollmentQueue`] and persisted later by [`enrollments::EnrollmentWorker`], which
//! re-checks the live age-group registry before writing.

pub mod age_groups;
pub mod config;
pub mod cpf;
pub mod enrollments;
pub mod error;
pub mod ident;
pub mod memory;
pub mod queue;
pub mod telemetry;
