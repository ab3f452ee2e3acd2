//! Sink for transaction types that were included without review.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use log::info;

/// Receives types classified as investment performance that are not in the
/// known investment type set.
///
/// Recording must be cheap and must not fail; it never changes how the
/// transaction is classified.
pub trait UnrecognizedTypeSink: Send + Sync {
    fn record(&self, bank: &str, transaction_type: &str);
}

/// Discards everything.
#[derive(Clone, Default)]
pub struct NoOpUnrecognizedTypeSink;

impl UnrecognizedTypeSink for NoOpUnrecognizedTypeSink {
    fn record(&self, _bank: &str, _transaction_type: &str) {}
}

/// Collects distinct (bank, type) pairs for later review.
#[derive(Clone, Default)]
pub struct CollectingUnrecognizedTypeSink {
    entries: Arc<Mutex<BTreeSet<(String, String)>>>,
}

impl CollectingUnrecognizedTypeSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<(String, String)>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Collected pairs, sorted by bank then type.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Log every collected pair and empty the sink. Returns what was logged.
    pub fn log_summary(&self) -> Vec<(String, String)> {
        let drained: Vec<_> = std::mem::take(&mut *self.lock()).into_iter().collect();
        if drained.is_empty() {
            return drained;
        }

        info!(
            "{} unrecognized investment transaction types included in returns",
            drained.len()
        );
        for (bank, transaction_type) in &drained {
            info!("  {}: '{}'", bank, transaction_type);
        }
        drained
    }
}

impl UnrecognizedTypeSink for CollectingUnrecognizedTypeSink {
    fn record(&self, bank: &str, transaction_type: &str) {
        self.lock()
            .insert((bank.to_string(), transaction_type.to_string()));
    }
}
