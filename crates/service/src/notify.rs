//! Movement event notification.
//!
//! The notifier is injected by reference wherever movement events are
//! emitted, with an explicit lifecycle instead of a process-wide singleton.

use tracing::info;

use pantry_movements::MovementRecord;

/// Receives committed-movement events.
pub trait MovementNotifier: Send + Sync {
    /// Prepare the notifier for delivery. Called once before first use.
    fn initialize(&self);

    /// A movement was fully applied and its record persisted.
    fn movement_committed(&self, record: &MovementRecord);

    /// Flush and release delivery resources. No events after this.
    fn shutdown(&self);
}

/// Notifier that emits structured log events.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl MovementNotifier for LogNotifier {
    fn initialize(&self) {
        info!("movement notifier ready");
    }

    fn movement_committed(&self, record: &MovementRecord) {
        info!(
            movement_id = %record.id,
            movement_type = ?record.movement_type,
            total_items = record.total_items,
            stock_manager = %record.stock_manager,
            "movement committed"
        );
    }

    fn shutdown(&self) {
        info!("movement notifier stopped");
    }
}

/// Notifier that drops everything. Test convenience.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl MovementNotifier for NoopNotifier {
    fn initialize(&self) {}
    fn movement_committed(&self, _record: &MovementRecord) {}
    fn shutdown(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;
    use pantry_movements::{MovementLine, StockMovement};

    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<&'static str>>,
    }

    impl MovementNotifier for RecordingNotifier {
        fn initialize(&self) {
            self.calls.lock().unwrap().push("initialize");
        }

        fn movement_committed(&self, _record: &MovementRecord) {
            self.calls.lock().unwrap().push("committed");
        }

        fn shutdown(&self) {
            self.calls.lock().unwrap().push("shutdown");
        }
    }

    #[test]
    fn lifecycle_calls_arrive_in_order() {
        let notifier = RecordingNotifier::default();
        let record = MovementRecord::commit(
            StockMovement::stock_in("Acme", "dana", vec![MovementLine::new("p1", "Flour", 1, "kg")]),
            Utc::now(),
        );

        notifier.initialize();
        notifier.movement_committed(&record);
        notifier.shutdown();

        assert_eq!(
            notifier.calls.lock().unwrap().as_slice(),
            &["initialize", "committed", "shutdown"]
        );
    }
}
