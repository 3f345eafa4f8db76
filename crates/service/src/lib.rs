//! `pantry-service` — movement execution and orchestration.
//!
//! The pieces here sit between the pure domain (`pantry-movements`) and the
//! catalog backend (`pantry-catalog`):
//!
//! - `executor`: applies validated deltas line-by-line, partial success is a
//!   first-class outcome;
//! - `retry`: bounded exponential backoff around transient transport errors;
//! - `records`: append-only audit record storage;
//! - `notify`: injected movement-event notifier with an explicit lifecycle;
//! - `service`: the `submit_movement` pipeline callers actually use.

pub mod executor;
pub mod notify;
pub mod records;
pub mod retry;
pub mod service;

pub use executor::{ExecutionError, LineOutcome, MovementExecutor};
pub use notify::{LogNotifier, MovementNotifier, NoopNotifier};
pub use records::{InMemoryRecordStore, MovementRecordStore, RecordStoreError};
pub use retry::{with_retry, RetryPolicy, TimeoutBudget};
pub use service::{messages, MovementService};
