//! Corpus storage abstraction.
//!
//! The pipeline loads the corpus from and saves computed feature values to
//! a [`Storage`] implementation. The trait is deliberately narrow: the
//! backend owns the format, the pipeline owns the semantics.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlStorage;
pub use memory::MemoryStorage;

use std::fmt;

use crate::corpus::TextRecord;
use crate::error::Result;

/// A backend that can load a corpus and persist feature values.
pub trait Storage: Send + Sync + fmt::Debug {
    /// Load records, optionally capped at `limit`.
    fn load(&self, limit: Option<usize>) -> Result<Vec<TextRecord>>;

    /// Persist computed feature values back to durable storage.
    ///
    /// With `feature: Some(name)` only that feature's values changed; with
    /// `None` every feature value is saved. Re-saving identical values must
    /// produce no observable change.
    fn save_features(&self, corpus: &[TextRecord], feature: Option<&str>) -> Result<()>;
}
