//! Weighted random action selection.

use crate::{ActionOutcome, BotAction, BotMetrics, SharedRng};
use rand::Rng;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use tweetsmith_error::ConfigError;

/// An action with its relative selection weight.
#[derive(Clone)]
pub struct ActionDescriptor {
    name: String,
    weight: f64,
    action: Arc<dyn BotAction>,
}

impl std::fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl ActionDescriptor {
    /// Create a descriptor.
    pub fn new(name: impl Into<String>, weight: f64, action: Arc<dyn BotAction>) -> Self {
        Self {
            name: name.into(),
            weight,
            action,
        }
    }

    /// Action name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Selects one action per invocation with probability proportional to its
/// weight and runs it.
///
/// The action set is fixed at construction. Execution counts and failures
/// are reported to [`BotMetrics`].
pub struct WeightedDispatcher {
    actions: Vec<ActionDescriptor>,
    total_weight: f64,
    rng: SharedRng,
    metrics: BotMetrics,
}

impl std::fmt::Debug for WeightedDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedDispatcher")
            .field("actions", &self.actions)
            .field("total_weight", &self.total_weight)
            .finish_non_exhaustive()
    }
}

impl WeightedDispatcher {
    /// Create a dispatcher.
    ///
    /// # Errors
    ///
    /// Returns error if the set is empty or any weight is not a positive
    /// finite number.
    pub fn new(
        actions: Vec<ActionDescriptor>,
        rng: SharedRng,
        metrics: BotMetrics,
    ) -> Result<Self, ConfigError> {
        if actions.is_empty() {
            return Err(ConfigError::new("dispatcher needs at least one action"));
        }
        if let Some(bad) = actions
            .iter()
            .find(|a| !a.weight.is_finite() || a.weight <= 0.0)
        {
            return Err(ConfigError::new(format!(
                "action '{}' has non-positive weight {}",
                bad.name, bad.weight
            )));
        }

        let total_weight = actions.iter().map(|a| a.weight).sum();
        Ok(Self {
            actions,
            total_weight,
            rng,
            metrics,
        })
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Registered actions in selection order.
    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    /// Metrics the dispatcher reports to.
    pub fn metrics(&self) -> &BotMetrics {
        &self.metrics
    }

    /// Map a draw in `[0, total_weight)` to an action.
    ///
    /// Walks the actions in order subtracting each weight; the first action
    /// whose subtraction brings the remainder to zero or below is selected,
    /// so a draw on a boundary selects the earlier action. Rounding that
    /// leaves a positive remainder selects the last action.
    pub fn select(&self, draw: f64) -> &ActionDescriptor {
        let mut remainder = draw;
        for descriptor in &self.actions {
            remainder -= descriptor.weight;
            if remainder <= 0.0 {
                return descriptor;
            }
        }
        // Non-empty by construction.
        &self.actions[self.actions.len() - 1]
    }

    /// Uniform draw in `[0, total_weight)`.
    pub fn draw(&self) -> f64 {
        self.rng.lock().gen_range(0.0..self.total_weight)
    }

    /// Select one action at random and run it.
    ///
    /// Returns the action name and its outcome.
    #[instrument(skip(self))]
    pub async fn select_and_run(&self) -> (String, ActionOutcome) {
        let draw = self.draw();
        let descriptor = self.select(draw);
        info!(
            action = descriptor.name(),
            draw,
            total_weight = self.total_weight,
            "Selected action"
        );
        let outcome = self.execute(descriptor).await;
        (descriptor.name.clone(), outcome)
    }

    /// Run an action by name, bypassing selection.
    pub async fn run_named(&self, name: &str) -> Option<ActionOutcome> {
        let descriptor = self.actions.iter().find(|a| a.name == name)?;
        Some(self.execute(descriptor).await)
    }

    async fn execute(&self, descriptor: &ActionDescriptor) -> ActionOutcome {
        self.metrics.record_execution(&descriptor.name);
        let outcome = descriptor.action.run().await;

        match &outcome {
            ActionOutcome::Completed { published } => {
                self.metrics.record_success(&descriptor.name);
                info!(action = descriptor.name(), published, "Action completed");
            }
            ActionOutcome::Skipped(reason) => {
                self.metrics.record_success(&descriptor.name);
                warn!(action = descriptor.name(), reason = %reason, "Action skipped");
            }
            ActionOutcome::Failed(reason) => {
                self.metrics.record_failure(&descriptor.name);
                error!(action = descriptor.name(), reason = %reason, "Action failed");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAction {
        name: &'static str,
        runs: AtomicUsize,
        outcome: ActionOutcome,
    }

    impl CountingAction {
        fn new(name: &'static str, outcome: ActionOutcome) -> Arc<Self> {
            Arc::new(Self {
                name,
                runs: AtomicUsize::new(0),
                outcome,
            })
        }
    }

    #[async_trait]
    impl BotAction for CountingAction {
        fn name(&self) -> &str {
            self.name
        }

        async fn run(&self) -> ActionOutcome {
            self.runs.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn ok() -> ActionOutcome {
        ActionOutcome::Completed { published: 1 }
    }

    fn rng(seed: u64) -> SharedRng {
        Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    const WEIGHTS: [(&str, f64); 5] = [
        ("quote", 3.0),
        ("news", 2.0),
        ("poll", 1.0),
        ("thread", 1.0),
        ("engagement", 4.0),
    ];

    fn dispatcher(seed: u64) -> WeightedDispatcher {
        let actions = WEIGHTS
            .iter()
            .map(|(name, weight)| {
                ActionDescriptor::new(*name, *weight, CountingAction::new(name, ok()))
            })
            .collect();
        WeightedDispatcher::new(actions, rng(seed), BotMetrics::new()).unwrap()
    }

    #[test]
    fn test_total_weight() {
        assert_eq!(dispatcher(0).total_weight(), 11.0);
    }

    #[test]
    fn test_select_known_draws() {
        let d = dispatcher(0);
        assert_eq!(d.select(2.5).name(), "quote");
        assert_eq!(d.select(10.9).name(), "engagement");
        assert_eq!(d.select(0.0).name(), "quote");
        assert_eq!(d.select(5.5).name(), "poll");
    }

    #[test]
    fn test_boundary_draw_selects_earlier_action() {
        let d = dispatcher(0);
        assert_eq!(d.select(3.0).name(), "quote");
        assert_eq!(d.select(5.0).name(), "news");
        assert_eq!(d.select(7.0).name(), "thread");
    }

    #[test]
    fn test_overshoot_selects_last_action() {
        assert_eq!(dispatcher(0).select(11.0 + 1e-9).name(), "engagement");
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let action = CountingAction::new("quote", ok());
        let actions = vec![
            ActionDescriptor::new("quote", 3.0, action.clone()),
            ActionDescriptor::new("poll", 0.0, action),
        ];
        let err = WeightedDispatcher::new(actions, rng(0), BotMetrics::new()).unwrap_err();
        assert!(err.message.contains("poll"));
    }

    #[test]
    fn test_debug_lists_action_names_and_weights() {
        let rendered = format!("{:?}", dispatcher(0));
        assert!(rendered.contains("WeightedDispatcher"));
        assert!(rendered.contains("\"engagement\""));
        assert!(rendered.contains("total_weight: 11.0"));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(WeightedDispatcher::new(Vec::new(), rng(0), BotMetrics::new()).is_err());
    }

    #[test]
    fn test_draw_within_range() {
        let d = dispatcher(9);
        for _ in 0..1_000 {
            let draw = d.draw();
            assert!((0.0..11.0).contains(&draw));
        }
    }

    #[test]
    fn test_sampling_matches_weights_chi_square() {
        let d = dispatcher(20_240_601);
        let samples = 110_000usize;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..samples {
            *counts.entry(d.select(d.draw()).name()).or_default() += 1;
        }

        let total = d.total_weight();
        let chi_square: f64 = WEIGHTS
            .iter()
            .map(|(name, weight)| {
                let expected = samples as f64 * weight / total;
                let observed = *counts.get(name).unwrap_or(&0) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum();

        // Four degrees of freedom, p = 0.001.
        assert!(chi_square < 18.467, "chi-square {chi_square} too large: {counts:?}");
    }

    #[tokio::test]
    async fn test_exactly_one_action_runs() {
        let actions: Vec<Arc<CountingAction>> = WEIGHTS
            .iter()
            .map(|(name, _)| CountingAction::new(name, ok()))
            .collect();
        let descriptors = WEIGHTS
            .iter()
            .zip(&actions)
            .map(|((name, weight), action)| {
                ActionDescriptor::new(*name, *weight, action.clone() as Arc<dyn BotAction>)
            })
            .collect();
        let d = WeightedDispatcher::new(descriptors, rng(5), BotMetrics::new()).unwrap();

        let (name, outcome) = d.select_and_run().await;

        assert_eq!(outcome, ok());
        let runs: usize = actions.iter().map(|a| a.runs.load(Ordering::SeqCst)).sum();
        assert_eq!(runs, 1);
        assert_eq!(d.metrics().executions(&name), 1);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_not_propagated() {
        let failing = CountingAction::new("poll", ActionOutcome::Failed("boom".into()));
        let d = WeightedDispatcher::new(
            vec![ActionDescriptor::new("poll", 1.0, failing)],
            rng(1),
            BotMetrics::new(),
        )
        .unwrap();

        let outcome = d.run_named("poll").await.unwrap();
        assert!(outcome.is_failure());
        assert_eq!(d.metrics().failures("poll"), 1);
        assert!(d.run_named("missing").await.is_none());
    }
}
