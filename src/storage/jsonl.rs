//! JSON Lines corpus storage.
//!
//! One record per line. The format stores all of a record's fields
//! together, so a single-feature save rewrites whole rows; the resulting
//! content only differs where values actually changed.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::corpus::TextRecord;
use crate::error::Result;
use crate::storage::Storage;

/// File-backed JSON Lines storage.
#[derive(Debug, Clone)]
pub struct JsonlStorage {
    path: PathBuf,
}

impl JsonlStorage {
    /// Create a storage backed by the given file path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonlStorage { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonlStorage {
    fn load(&self, limit: Option<usize>) -> Result<Vec<TextRecord>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
            if let Some(limit) = limit {
                if records.len() >= limit {
                    break;
                }
            }
        }
        log::debug!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn save_features(&self, corpus: &[TextRecord], feature: Option<&str>) -> Result<()> {
        // Write the whole corpus to a sibling file, then swap it in.
        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            for record in corpus {
                serde_json::to_writer(&mut writer, record)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        match feature {
            Some(name) => log::debug!(
                "saved feature {name:?} for {} records to {}",
                corpus.len(),
                self.path.display()
            ),
            None => log::debug!(
                "saved all features for {} records to {}",
                corpus.len(),
                self.path.display()
            ),
        }
        Ok(())
    }
}
