//! Registry of non-overlapping closed age intervals.
//!
//! Every read goes to the backing [`AgeGroupStore`]; nothing is cached in process, so both
//! admission and the worker always see the latest committed intervals.

pub mod domain;
pub mod registry;
pub mod repository;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{AgeGroup, AgeRange, InvalidRange, NewAgeGroup};
pub use registry::{AgeGroupRegistry, RegistryError};
pub use repository::AgeGroupStore;
pub use router::age_group_router;
