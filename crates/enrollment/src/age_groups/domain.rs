use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ident::RecordId;

/// Closed interval `[min_age, max_age]` with `min_age < max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    min_age: u32,
    max_age: u32,
}

impl AgeRange {
    pub fn new(min_age: u32, max_age: u32) -> Result<Self, InvalidRange> {
        if min_age >= max_age {
            return Err(InvalidRange { min_age, max_age });
        }
        Ok(Self { min_age, max_age })
    }

    pub const fn min_age(&self) -> u32 {
        self.min_age
    }

    pub const fn max_age(&self) -> u32 {
        self.max_age
    }

    /// Shared endpoints count as overlapping.
    pub const fn overlaps(&self, other: &AgeRange) -> bool {
        self.min_age <= other.max_age && self.max_age >= other.min_age
    }

    pub const fn contains(&self, age: u32) -> bool {
        self.min_age <= age && age <= self.max_age
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("min_age must be lower than max_age (got {min_age}..{max_age})")]
pub struct InvalidRange {
    pub min_age: u32,
    pub max_age: u32,
}

/// Registered age group as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroup {
    pub id: RecordId,
    pub min_age: u32,
    pub max_age: u32,
}

impl AgeGroup {
    pub fn new(id: RecordId, range: AgeRange) -> Self {
        Self {
            id,
            min_age: range.min_age,
            max_age: range.max_age,
        }
    }

    pub const fn range(&self) -> AgeRange {
        AgeRange {
            min_age: self.min_age,
            max_age: self.max_age,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.id, self.min_age, self.max_age)
    }
}

/// Registration payload accepted over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAgeGroup {
    pub min_age: u32,
    pub max_age: u32,
}
