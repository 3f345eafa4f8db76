//! The movement submission pipeline.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use pantry_catalog::{CatalogError, ProductCatalog};
use pantry_core::{ProductId, ServiceResponse, TransportError};
use pantry_movements::{validate, MovementRecord, StockMovement, StockSnapshot};

use crate::executor::{LineOutcome, MovementExecutor};
use crate::notify::MovementNotifier;
use crate::records::MovementRecordStore;
use crate::retry::{with_retry, with_timeout, RetryPolicy, TimeoutBudget};

/// Failure summary messages. The HTTP edge maps these onto status codes,
/// so they are constants rather than inline literals.
pub mod messages {
    pub const VALIDATION_FAILED: &str = "validation failed";
    pub const TIMEOUT: &str = "timeout";
    pub const NETWORK_ERROR: &str = "network error";
}

/// Orchestrates snapshot read, validation, execution, and record
/// persistence for one movement submission.
///
/// Validation errors are surfaced all at once and never retried; transport
/// failures are retried with bounded backoff and then folded into a typed
/// failure. Callers always get a [`ServiceResponse`], never an error.
pub struct MovementService<C, R, N> {
    catalog: Arc<C>,
    executor: MovementExecutor<C>,
    records: Arc<R>,
    notifier: Arc<N>,
    retry: RetryPolicy,
    timeouts: TimeoutBudget,
}

impl<C, R, N> MovementService<C, R, N>
where
    C: ProductCatalog,
    R: MovementRecordStore,
    N: MovementNotifier,
{
    pub fn new(catalog: Arc<C>, records: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            executor: MovementExecutor::new(catalog.clone()),
            catalog,
            records,
            notifier,
            retry: RetryPolicy::default(),
            timeouts: TimeoutBudget::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout_budget(mut self, timeouts: TimeoutBudget) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Read current quantities for the given products, with retry.
    pub async fn read_snapshot(&self, ids: &[ProductId]) -> Result<StockSnapshot, TransportError> {
        let budget = self.timeouts.for_lines(ids.len());
        with_retry(&self.retry, |_| {
            with_timeout(budget, async {
                self.catalog.snapshot(ids).await.map_err(catalog_to_transport)
            })
        })
        .await
    }

    /// Submit one movement: validate against a fresh snapshot, apply every
    /// line, and persist the audit record when all lines succeed.
    pub async fn submit_movement(&self, movement: StockMovement) -> ServiceResponse<MovementRecord> {
        // Empty batches are rejected before any catalog read.
        if movement.lines.is_empty() {
            let errors = validate(&movement, &StockSnapshot::new())
                .expect_err("empty batch must fail validation");
            return validation_failure(errors);
        }

        let snapshot = match self.read_snapshot(&movement.product_ids()).await {
            Ok(snapshot) => snapshot,
            Err(err) => return transport_failure(err),
        };

        if let Err(errors) = validate(&movement, &snapshot) {
            warn!(count = errors.len(), "movement rejected by validation");
            return validation_failure(errors);
        }

        let budget = self.timeouts.for_lines(movement.lines.len());
        let outcomes = match with_retry(&self.retry, |_| {
            with_timeout(budget, self.executor.execute(&movement))
        })
        .await
        {
            Ok(outcomes) => outcomes,
            Err(err) => return transport_failure(err),
        };

        let failed: Vec<&LineOutcome> = outcomes.iter().filter(|o| !o.success).collect();
        if !failed.is_empty() {
            let errors = failed
                .iter()
                .map(|o| {
                    format!(
                        "{}: {}",
                        o.product_id,
                        o.error.as_deref().unwrap_or("unknown error")
                    )
                })
                .collect();
            return ServiceResponse::failure(
                format!("{} of {} lines failed", failed.len(), outcomes.len()),
                errors,
            );
        }

        let record = MovementRecord::commit(movement, Utc::now());
        if let Err(err) = self.records.append(record.clone()).await {
            // The catalog writes are already applied; losing the audit
            // record is a reportable failure, not a rollback.
            warn!(%err, movement_id = %record.id, "failed to persist movement record");
            return ServiceResponse::failure("failed to persist movement record", vec![err.to_string()]);
        }

        info!(movement_id = %record.id, total_items = record.total_items, "movement committed");
        self.notifier.movement_committed(&record);
        ServiceResponse::ok(record)
    }
}

fn catalog_to_transport(err: CatalogError) -> TransportError {
    match err {
        CatalogError::Unavailable(transport) => transport,
        other => TransportError::status(500, other.to_string()),
    }
}

fn validation_failure<T>(errors: Vec<pantry_movements::ValidationError>) -> ServiceResponse<T> {
    ServiceResponse::failure(
        messages::VALIDATION_FAILED,
        errors.iter().map(|e| e.to_wire()).collect(),
    )
}

fn transport_failure<T>(err: TransportError) -> ServiceResponse<T> {
    let message = match &err {
        TransportError::Timeout(_) => messages::TIMEOUT,
        _ => messages::NETWORK_ERROR,
    };
    ServiceResponse::failure(message, vec![err.to_string()])
}
