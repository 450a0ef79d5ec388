//! The CPU-bound per-record digest.
//!
//! The digest of a record is a chain of SHA-256 hashes: the first hashes the record's fields
//! joined by spaces, and each of the `iterations` following rounds hashes the round number
//! followed by the lowercase hex text of the previous digest. The iteration count sets the
//! per-record CPU cost.

use std::sync::Arc;

use sha2::{Digest as _, Sha256};

use crate::record::Record;

/// Number of bytes in a record digest.
pub const DIGEST_LEN: usize = 32;

/// Default number of chained re-hash rounds.
pub const DEFAULT_ITERATIONS: u32 = 1000;

/// Fixed-size digest bytes.
pub type Digest = [u8; DIGEST_LEN];

/// Computes chained SHA-256 digests of records.
///
/// Stateless apart from its configuration, so one instance can be shared by every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digester {
    iterations: u32,
}

impl Default for Digester {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl Digester {
    /// Creates a digester that applies `iterations` rounds after the base hash.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Number of chained rounds.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Computes the digest of `record`.
    ///
    /// The input position of the record is not part of the digest.
    #[must_use]
    pub fn digest(&self, record: &Record) -> Digest {
        let seed = format!(
            "{} {} {} {} {}",
            record.name, record.year, record.grade, record.username, record.gender
        );
        let mut digest: Digest = Sha256::digest(seed.as_bytes()).into();

        for round in 0..self.iterations {
            let mut hasher = Sha256::new();
            hasher.update(round.to_string().as_bytes());
            hasher.update(hex::encode(digest).as_bytes());
            digest = hasher.finalize().into();
        }
        digest
    }
}

/// A record that passed the filter, paired with its digest.
///
/// The record is shared read-only with the worker that produced the result.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestResult {
    /// The digested record.
    pub record: Arc<Record>,
    /// Digest of the record.
    pub digest: Digest,
}

impl DigestResult {
    /// Pairs a record with its digest.
    #[must_use]
    pub fn new(record: Arc<Record>, digest: Digest) -> Self {
        Self { record, digest }
    }

    /// Lowercase hex text of the digest.
    #[must_use]
    pub fn hex_digest(&self) -> String {
        hex::encode(self.digest)
    }

    /// True if `self` is placed strictly ahead of `other` in the ranked output.
    #[must_use]
    pub fn outranks(&self, other: &Self) -> bool {
        self.record.outranks(&other.record)
    }
}
