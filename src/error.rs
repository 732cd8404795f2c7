//! Error handling for the publisher domain
//!
//! This module provides:
//! - The domain error taxonomy (`DomainError`)
//! - Error telemetry counters shared by the whole process
//! - Context helpers for application-level `anyhow` results

use anyhow::{Context as _, Result};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = std::result::Result<T, DomainError>;

// =============================================================================
// DOMAIN ERRORS
// =============================================================================

/// Errors raised by domain mutators and constructors.
///
/// The only validated invariant is that a registration year never lies in
/// the future. Lookups, sorts, copies and filters are total and never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An argument violates a domain invariant
    #[error("invalid argument '{field}': {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl DomainError {
    /// Build an `InvalidArgument` error
    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidArgument { .. } => "invalid_argument",
        }
    }

    /// Error category for metrics
    pub fn category(&self) -> &'static str {
        match self {
            DomainError::InvalidArgument { .. } => "validation_error",
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::InvalidArgument { field, .. } => field,
        }
    }

    /// Add this error to telemetry
    pub fn track(&self) {
        ERROR_METRICS.record_error(self);
        crate::metrics::METRICS.record_domain_error(self.field());
    }
}

// =============================================================================
// ERROR TELEMETRY
// =============================================================================

/// Error counters for telemetry
#[derive(Debug)]
pub struct ErrorMetrics {
    /// Error count by code
    code_counts: RwLock<HashMap<&'static str, AtomicU64>>,
    /// Error count by field
    field_counts: RwLock<HashMap<&'static str, AtomicU64>>,
}

impl ErrorMetrics {
    pub fn new() -> Self {
        Self {
            code_counts: RwLock::new(HashMap::new()),
            field_counts: RwLock::new(HashMap::new()),
        }
    }

    /// Record an error occurrence
    pub fn record_error(&self, error: &DomainError) {
        increment(&self.code_counts, error.code());
        increment(&self.field_counts, error.field());

        tracing::debug!(
            error_code = error.code(),
            field = error.field(),
            category = error.category(),
            "error recorded"
        );
    }

    /// Get error count for a specific code
    pub fn get_error_count(&self, code: &str) -> u64 {
        self.code_counts
            .read()
            .get(code)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Get error count for a specific field
    pub fn get_field_count(&self, field: &str) -> u64 {
        self.field_counts
            .read()
            .get(field)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Get all error statistics
    pub fn get_stats(&self) -> ErrorStats {
        let snapshot = |map: &RwLock<HashMap<&'static str, AtomicU64>>| {
            map.read()
                .iter()
                .map(|(key, counter)| (key.to_string(), counter.load(Ordering::Relaxed)))
                .collect()
        };

        ErrorStats {
            code_counts: snapshot(&self.code_counts),
            field_counts: snapshot(&self.field_counts),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.code_counts.write().clear();
        self.field_counts.write().clear();
    }
}

impl Default for ErrorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn increment(map: &RwLock<HashMap<&'static str, AtomicU64>>, key: &'static str) {
    {
        let read = map.read();
        if let Some(counter) = read.get(key) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }
    }
    map.write()
        .entry(key)
        .or_insert_with(|| AtomicU64::new(0))
        .fetch_add(1, Ordering::Relaxed);
}

/// Error statistics snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ErrorStats {
    pub code_counts: HashMap<String, u64>,
    pub field_counts: HashMap<String, u64>,
}

/// Global error metrics instance
pub static ERROR_METRICS: once_cell::sync::Lazy<ErrorMetrics> =
    once_cell::sync::Lazy::new(ErrorMetrics::new);

// =============================================================================
// CONTEXT HELPERS
// =============================================================================

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add operation context
    fn with_operation(self, operation: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_operation(self, operation: &str) -> Result<T> {
        self.with_context(|| format!("Operation '{}' failed", operation))
    }
}
