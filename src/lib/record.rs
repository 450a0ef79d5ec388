//! The ingested record and its ranking order.
//!
//! Records are ranked by `year` descending, then `grade` descending. Records that tie on
//! both keys keep their input order: the record loaded first ranks ahead. The input position
//! (`ordinal`) is assigned when the batch is fed to the workers and is the last key of
//! [`Record::placement_cmp`], which makes the placement order total over a batch and
//! independent of which worker finishes first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One input record ("student" in the reference data set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Display name; the primary identifier in the report.
    pub name: String,
    /// Ranking key, compared first (higher ranks first).
    pub year: i32,
    /// Score used by the filter and as the secondary ranking key.
    pub grade: f64,
    /// Auxiliary field; only contributes to the digest.
    #[serde(default)]
    pub gender: String,
    /// Secondary identifier printed next to the name.
    #[serde(default)]
    pub username: String,
    /// Zero-based position in the input batch.
    #[serde(skip)]
    pub ordinal: usize,
}

impl Record {
    /// Creates a record at input position 0.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        gender: impl Into<String>,
        year: i32,
        grade: f64,
    ) -> Self {
        Self {
            name: name.into(),
            year,
            grade,
            gender: gender.into(),
            username: username.into(),
            ordinal: 0,
        }
    }

    /// Returns this record with its input position set.
    #[must_use]
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Compares the ranking keys only: `year`, then `grade`.
    ///
    /// `Greater` means `self` ranks ahead of `other`.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.year.cmp(&other.year).then_with(|| self.grade.total_cmp(&other.grade))
    }

    /// Compares for placement in the ranked output.
    ///
    /// Extends [`Record::rank_cmp`] with the input position, where the earlier record ranks
    /// ahead. Only records with the same ordinal compare `Equal`.
    #[must_use]
    pub fn placement_cmp(&self, other: &Self) -> Ordering {
        self.rank_cmp(other).then_with(|| other.ordinal.cmp(&self.ordinal))
    }

    /// True if `self` is placed strictly ahead of `other`.
    #[must_use]
    pub fn outranks(&self, other: &Self) -> bool {
        self.placement_cmp(other) == Ordering::Greater
    }

    /// True if this record passes the score filter.
    #[must_use]
    pub fn passes(&self, min_score: f64) -> bool {
        self.grade >= min_score
    }
}
