//! Bot server: schedulers feeding a single bot loop, plus the health API.

use crate::schedule::{delay_until, next_fire, parse_cron};
use crate::{ActionKind, ApiState, BotConfig, WeightedDispatcher, create_router};
use chrono::Utc;
use cron::Schedule;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use tweetsmith_error::{ServerError, ServerErrorKind, TweetsmithResult};

/// What a trigger asks the bot loop to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Weighted random selection among all actions
    Weighted,
    /// One fixed action
    Action(ActionKind),
}

impl Trigger {
    /// Trigger of a named schedule entry.
    pub fn for_schedule(name: &str) -> Option<Self> {
        match name {
            "main_activity" => Some(Self::Weighted),
            "morning_quote" => Some(Self::Action(ActionKind::Quote)),
            "lunch_poll" => Some(Self::Action(ActionKind::Poll)),
            "afternoon_thread" => Some(Self::Action(ActionKind::Thread)),
            "evening_news" => Some(Self::Action(ActionKind::News)),
            "community_engagement" => Some(Self::Action(ActionKind::Engagement)),
            _ => None,
        }
    }
}

/// Message types for the bot loop.
#[derive(Debug, Clone)]
pub enum BotMessage {
    /// Run a trigger
    Run {
        /// Schedule entry that fired
        source: String,
        /// What to run
        trigger: Trigger,
    },
    /// Shutdown the loop
    Shutdown,
}

/// Consumes triggers one at a time, so actions never overlap.
///
/// A trigger arriving while an action runs waits in the channel.
#[derive(Debug)]
pub struct BotLoop {
    dispatcher: Arc<WeightedDispatcher>,
    rx: mpsc::Receiver<BotMessage>,
}

impl BotLoop {
    /// Creates a new bot loop.
    pub fn new(dispatcher: Arc<WeightedDispatcher>, rx: mpsc::Receiver<BotMessage>) -> Self {
        Self { dispatcher, rx }
    }

    /// Runs the loop until `Shutdown` or until every sender is dropped.
    ///
    /// Returns the number of triggers handled.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> usize {
        info!("Bot loop started");
        let mut handled = 0;

        while let Some(msg) = self.rx.recv().await {
            match msg {
                BotMessage::Run { source, trigger } => {
                    debug!(source = %source, ?trigger, "Trigger received");
                    match trigger {
                        Trigger::Weighted => {
                            self.dispatcher.select_and_run().await;
                        }
                        Trigger::Action(kind) => {
                            if self.dispatcher.run_named(kind.as_str()).await.is_none() {
                                warn!(action = kind.as_str(), "No such action registered");
                            }
                        }
                    }
                    handled += 1;
                }
                BotMessage::Shutdown => {
                    info!("Bot loop shutting down");
                    break;
                }
            }
        }

        handled
    }
}

/// Bot server that runs every configured schedule.
#[derive(Debug)]
pub struct BotServer {
    config: Arc<BotConfig>,
    dispatcher: Arc<WeightedDispatcher>,
    serve_api: bool,
}

impl BotServer {
    /// Creates a new bot server.
    pub fn new(config: Arc<BotConfig>, dispatcher: Arc<WeightedDispatcher>) -> Self {
        Self {
            config,
            dispatcher,
            serve_api: true,
        }
    }

    /// Skip the health API (for embedding and tests).
    pub fn without_api(mut self) -> Self {
        self.serve_api = false;
        self
    }

    /// Runs until Ctrl-C.
    pub async fn start(self) -> TweetsmithResult<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Runs until `shutdown` completes, then drains the in-flight action.
    ///
    /// # Errors
    ///
    /// Returns error if a schedule is invalid, the health API cannot bind,
    /// or the bot loop task fails.
    #[instrument(skip(self, shutdown))]
    pub async fn run_until<F>(self, shutdown: F) -> TweetsmithResult<()>
    where
        F: Future<Output = ()>,
    {
        info!(bot = %self.config.bot.name, "Starting bot server");

        let mut schedules = Vec::new();
        for (name, expression) in self.config.schedule.entries() {
            let Some(trigger) = Trigger::for_schedule(name) else {
                continue;
            };
            schedules.push((name, parse_cron(expression)?, trigger));
        }

        let (tx, rx) = mpsc::channel(32);
        let loop_handle = tokio::spawn(BotLoop::new(Arc::clone(&self.dispatcher), rx).run());

        let scheduler_handles: Vec<JoinHandle<()>> = schedules
            .into_iter()
            .map(|(name, schedule, trigger)| spawn_scheduler(name, schedule, trigger, tx.clone()))
            .collect();

        let api_handle = if self.serve_api {
            Some(self.spawn_api().await?)
        } else {
            None
        };

        shutdown.await;
        info!("Shutdown requested");

        for handle in &scheduler_handles {
            handle.abort();
        }
        if tx.send(BotMessage::Shutdown).await.is_err() {
            warn!("Bot loop already stopped");
        }

        let handled = loop_handle
            .await
            .map_err(|e| ServerError::new(ServerErrorKind::TaskJoin(e.to_string())))?;

        if let Some(handle) = api_handle {
            handle.abort();
        }

        info!(handled, "Bot server stopped");
        Ok(())
    }

    async fn spawn_api(&self) -> Result<JoinHandle<()>, ServerError> {
        let address = self.config.server.bind_address.clone();
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| {
                ServerError::new(ServerErrorKind::Bind {
                    address: address.clone(),
                    message: e.to_string(),
                })
            })?;

        let state = ApiState::new(
            self.dispatcher.metrics().clone(),
            self.config.bot.name.clone(),
            self.config.bot.version.clone(),
        );
        let router = create_router(state);
        info!(address = %address, "Health API listening");

        Ok(tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!(error = %e, "Health API stopped");
            }
        }))
    }
}

/// Send `trigger` each time `schedule` fires until the channel closes.
fn spawn_scheduler(
    name: &'static str,
    schedule: Schedule,
    trigger: Trigger,
    tx: mpsc::Sender<BotMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let Some(next) = next_fire(&schedule, now) else {
                warn!(schedule = name, "Schedule has no future fire times");
                break;
            };
            debug!(schedule = name, next = %next, "Next trigger scheduled");
            tokio::time::sleep(delay_until(now, next)).await;

            let msg = BotMessage::Run {
                source: name.to_string(),
                trigger,
            };
            if tx.send(msg).await.is_err() {
                error!(schedule = name, "Bot loop channel closed");
                break;
            }
        }
    })
}
