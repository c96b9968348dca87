//! Metrics collection for bot actions.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector keyed by action name.
#[derive(Debug, Clone)]
pub struct BotMetrics {
    inner: Arc<BotMetricsInner>,
}

#[derive(Debug)]
struct BotMetricsInner {
    total_executions: AtomicU64,
    total_failures: AtomicU64,
    actions: Mutex<BTreeMap<String, ActionCounters>>,
}

#[derive(Debug, Default)]
struct ActionCounters {
    executions: u64,
    failures: u64,
    last_success: Option<Instant>,
}

impl Default for BotMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl BotMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BotMetricsInner {
                total_executions: AtomicU64::new(0),
                total_failures: AtomicU64::new(0),
                actions: Mutex::new(BTreeMap::new()),
            }),
        }
    }

    /// Records that an action started.
    pub fn record_execution(&self, action: &str) {
        self.inner.total_executions.fetch_add(1, Ordering::Relaxed);
        self.inner
            .actions
            .lock()
            .entry(action.to_string())
            .or_default()
            .executions += 1;
    }

    /// Records that an action completed.
    pub fn record_success(&self, action: &str) {
        self.inner
            .actions
            .lock()
            .entry(action.to_string())
            .or_default()
            .last_success = Some(Instant::now());
    }

    /// Records that an action failed.
    pub fn record_failure(&self, action: &str) {
        self.inner.total_failures.fetch_add(1, Ordering::Relaxed);
        self.inner
            .actions
            .lock()
            .entry(action.to_string())
            .or_default()
            .failures += 1;
    }

    /// Gets the execution count of an action.
    pub fn executions(&self, action: &str) -> u64 {
        self.inner
            .actions
            .lock()
            .get(action)
            .map_or(0, |c| c.executions)
    }

    /// Gets the failure count of an action.
    pub fn failures(&self, action: &str) -> u64 {
        self.inner.actions.lock().get(action).map_or(0, |c| c.failures)
    }

    /// Gets overall success rate (0.0 - 1.0).
    pub fn overall_success_rate(&self) -> f64 {
        let total_executions = self.inner.total_executions.load(Ordering::Relaxed);
        let total_failures = self.inner.total_failures.load(Ordering::Relaxed);

        if total_executions == 0 {
            return 1.0;
        }

        let successes = total_executions.saturating_sub(total_failures);
        successes as f64 / total_executions as f64
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let actions = self
            .inner
            .actions
            .lock()
            .iter()
            .map(|(name, counters)| {
                (
                    name.clone(),
                    ActionMetricSnapshot {
                        executions: counters.executions,
                        failures: counters.failures,
                        seconds_since_success: counters
                            .last_success
                            .map(|instant| instant.elapsed().as_secs()),
                    },
                )
            })
            .collect();

        MetricsSnapshot {
            actions,
            total_executions: self.inner.total_executions.load(Ordering::Relaxed),
            overall_success_rate: self.overall_success_rate(),
        }
    }
}

/// Serializable snapshot of bot metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Per-action metrics
    pub actions: BTreeMap<String, ActionMetricSnapshot>,
    /// Executions across all actions
    pub total_executions: u64,
    /// Overall success rate across all actions
    pub overall_success_rate: f64,
}

/// Serializable snapshot of one action's metrics.
#[derive(Debug, Clone, Serialize)]
pub struct ActionMetricSnapshot {
    /// Number of executions
    pub executions: u64,
    /// Number of failures
    pub failures: u64,
    /// Seconds since last success
    pub seconds_since_success: Option<u64>,
}
