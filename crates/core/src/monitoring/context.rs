//! Monitoring context - active strategy plus alert fan-out

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use textops_domain::Observation;
use tracing::{debug, error, warn};

use super::strategy::MonitoringStrategy;

/// Subscriber invoked with the observation that triggered drift.
pub type AlertCallback = Arc<dyn Fn(&Observation) -> anyhow::Result<()> + Send + Sync>;

/// What one `monitor` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertOutcome {
    /// Strategy verdict for the observation
    pub drift_detected: bool,
    /// Callbacks run, including failed ones
    pub callbacks_invoked: usize,
    /// Callbacks that returned an error or panicked
    pub callbacks_failed: usize,
}

/// Runs observations through the active strategy and alerts subscribers.
///
/// Callbacks run synchronously, in registration order, and all of them finish
/// before [`monitor`](Self::monitor) returns. A slow callback stalls the
/// caller. A failing or panicking callback is logged and skipped; the rest
/// still run.
pub struct MonitoringContext {
    strategy: RwLock<Arc<dyn MonitoringStrategy>>,
    callbacks: RwLock<Vec<AlertCallback>>,
}

impl MonitoringContext {
    /// Context with `strategy` active and no callbacks
    pub fn new(strategy: Arc<dyn MonitoringStrategy>) -> Self {
        Self { strategy: RwLock::new(strategy), callbacks: RwLock::new(Vec::new()) }
    }

    /// Swap the strategy used by subsequent `monitor` calls
    pub fn set_strategy(&self, strategy: Arc<dyn MonitoringStrategy>) {
        let mut current = self.strategy.write();
        debug!(from = current.name(), to = strategy.name(), "Monitoring strategy changed");
        *current = strategy;
    }

    /// Currently active strategy
    pub fn strategy(&self) -> Arc<dyn MonitoringStrategy> {
        Arc::clone(&*self.strategy.read())
    }

    /// Append a subscriber
    pub fn add_alert_callback<F>(&self, callback: F)
    where
        F: Fn(&Observation) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.callbacks.write().push(Arc::new(callback));
    }

    /// Number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Evaluate `observation` and, on drift, invoke every callback with it.
    pub fn monitor(&self, observation: &Observation) -> AlertOutcome {
        let strategy = self.strategy();
        if !strategy.evaluate(observation) {
            return AlertOutcome::default();
        }

        // Snapshot so callbacks may register further callbacks without deadlocking.
        let callbacks: Vec<AlertCallback> = self.callbacks.read().clone();
        warn!(
            strategy = strategy.name(),
            subscribers = callbacks.len(),
            observation = ?observation,
            "Drift detected; notifying subscribers"
        );

        let mut outcome = AlertOutcome { drift_detected: true, ..AlertOutcome::default() };
        for (index, callback) in callbacks.iter().enumerate() {
            outcome.callbacks_invoked += 1;
            match panic::catch_unwind(AssertUnwindSafe(|| callback(observation))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    outcome.callbacks_failed += 1;
                    error!(callback = index, error = %err, "Alert callback failed");
                }
                Err(payload) => {
                    outcome.callbacks_failed += 1;
                    error!(
                        callback = index,
                        panic = %panic_message(&*payload),
                        "Alert callback panicked"
                    );
                }
            }
        }
        outcome
    }
}

impl fmt::Debug for MonitoringContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoringContext")
            .field("strategy", &*self.strategy.read())
            .field("callbacks", &self.callback_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Debug)]
    struct Always(bool);

    impl MonitoringStrategy for Always {
        fn name(&self) -> &str {
            "always"
        }

        fn evaluate(&self, _observation: &Observation) -> bool {
            self.0
        }
    }

    #[test]
    fn no_drift_invokes_nothing() {
        let context = MonitoringContext::new(Arc::new(Always(false)));
        let calls = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&calls);
        context.add_alert_callback(move |_| {
            *seen.lock() += 1;
            Ok(())
        });

        assert_eq!(context.monitor(&Observation::new()), AlertOutcome::default());
        assert_eq!(*calls.lock(), 0);
    }

    #[test]
    fn failing_callbacks_are_isolated() {
        let context = MonitoringContext::new(Arc::new(Always(true)));
        let order = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&order);
        context.add_alert_callback(move |_| {
            log.lock().push("first");
            anyhow::bail!("sink unavailable")
        });
        context.add_alert_callback(|_| panic!("subscriber bug"));
        let log = Arc::clone(&order);
        context.add_alert_callback(move |_| {
            log.lock().push("third");
            Ok(())
        });

        let outcome = context.monitor(&Observation::new().with("accuracy", 0.1));
        assert_eq!(
            outcome,
            AlertOutcome { drift_detected: true, callbacks_invoked: 3, callbacks_failed: 2 }
        );
        assert_eq!(*order.lock(), vec!["first", "third"]);
    }

    #[test]
    fn strategy_swap_applies_to_next_call() {
        let context = MonitoringContext::new(Arc::new(Always(false)));
        assert!(!context.monitor(&Observation::new()).drift_detected);

        context.set_strategy(Arc::new(Always(true)));
        assert!(context.monitor(&Observation::new()).drift_detected);
        assert_eq!(context.strategy().name(), "always");
    }

    #[test]
    fn panic_payloads_are_rendered() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(&*payload), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&*payload), "non-string panic payload");
    }
}
