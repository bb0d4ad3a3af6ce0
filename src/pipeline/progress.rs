//! Best-effort progress notification from the runner.

use std::sync::Mutex;

/// Observer notified as chunks move through the pipeline.
///
/// Called synchronously from the runner between backend calls with a
/// fraction in `[0, 1]` and a human-readable message. Implementations must
/// not block or panic; notification is best-effort and never affects the
/// pipeline outcome.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, fraction: f64, message: &str);
}

/// Observer that records every notification, for tests and batch summaries.
#[derive(Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<(f64, String)>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notifications received so far.
    pub fn events(&self) -> Vec<(f64, String)> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl ProgressObserver for CollectingObserver {
    fn on_progress(&self, fraction: f64, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((fraction, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_observer_records_in_order() {
        let observer = CollectingObserver::new();
        observer.on_progress(0.0, "start");
        observer.on_progress(0.5, "half");
        observer.on_progress(1.0, "done");

        let events = observer.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], (0.0, "start".to_string()));
        assert_eq!(events[2], (1.0, "done".to_string()));
    }

    #[test]
    fn observer_trait_is_object_safe() {
        let observer: Box<dyn ProgressObserver> = Box::new(CollectingObserver::new());
        observer.on_progress(0.25, "quarter");
    }
}
