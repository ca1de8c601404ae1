// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of the `applied_at` stamp written to the migration ledger.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
