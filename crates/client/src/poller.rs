//! Feed polling with backoff, jitter and pause-on-failure.
//!
//! Replaces a fixed-interval unconditional refresh: successful ticks repeat
//! at the base interval with jitter, failures back off exponentially, and
//! after enough consecutive failures the loop pauses until the next
//! user-visible interaction.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use domain::models::NotificationQuery;

use crate::config::PollConfig;
use crate::error::ClientError;
use crate::feed::FeedService;
use crate::metrics;

/// A unit of periodic work driven by the poller.
#[async_trait]
pub trait PollTask: Send + Sync {
    /// The name of this task (used for logging).
    fn name(&self) -> &'static str;

    /// Execute one tick.
    async fn execute(&self) -> Result<(), ClientError>;
}

/// Refreshes the feed and stats on every tick.
pub struct FeedRefreshTask {
    service: Arc<FeedService>,
    query: NotificationQuery,
}

impl FeedRefreshTask {
    pub fn new(service: Arc<FeedService>, query: NotificationQuery) -> Self {
        Self { service, query }
    }
}

#[async_trait]
impl PollTask for FeedRefreshTask {
    fn name(&self) -> &'static str {
        "feed_refresh"
    }

    async fn execute(&self) -> Result<(), ClientError> {
        self.service.refresh(&self.query).await?;
        self.service.stats().await?;
        Ok(())
    }
}

/// Background poll loop with graceful shutdown.
pub struct Poller {
    config: PollConfig,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    resume: Arc<Notify>,
    handles: Vec<JoinHandle<()>>,
}

impl Poller {
    pub fn new(config: PollConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            config,
            shutdown_tx,
            shutdown_rx,
            resume: Arc::new(Notify::new()),
            handles: Vec::new(),
        }
    }

    /// Signal a user-visible interaction; a poller paused after repeated
    /// failures resumes immediately.
    pub fn interaction(&self) {
        self.resume.notify_waiters();
    }

    /// Handle that can be wired into UI event paths to call
    /// [`Poller::interaction`] without holding the poller itself.
    pub fn interaction_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.resume)
    }

    /// Start polling with the given task. The first tick happens after one
    /// full base interval; callers wanting an immediate load perform it
    /// before starting the poller.
    pub fn start<T: PollTask + 'static>(&mut self, task: T) {
        let task = Arc::new(task);
        let config = self.config.clone();
        let mut shutdown_rx = self.shutdown_rx.clone();
        let resume = Arc::clone(&self.resume);

        let handle = tokio::spawn(async move {
            let name = task.name();
            let base = Duration::from_secs(config.base_interval_secs);
            let max = Duration::from_secs(config.max_interval_secs);
            let mut consecutive_failures: u32 = 0;

            info!(task = name, interval_secs = config.base_interval_secs, "Poller started");

            loop {
                let delay = {
                    let mut rng = rand::thread_rng();
                    let raw = backoff_delay(base, consecutive_failures, max);
                    apply_jitter(raw, config.jitter_ratio, &mut rng)
                };

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            info!(task = name, "Poller shutting down");
                            break;
                        }
                        continue;
                    }
                }

                match task.execute().await {
                    Ok(()) => {
                        if consecutive_failures > 0 {
                            info!(task = name, "Polling recovered");
                        }
                        consecutive_failures = 0;
                        metrics::record_poll_outcome(true);
                    }
                    Err(e) => {
                        consecutive_failures += 1;
                        metrics::record_poll_outcome(false);
                        warn!(
                            task = name,
                            consecutive_failures = consecutive_failures,
                            error = %e,
                            "Poll tick failed"
                        );

                        if consecutive_failures >= config.failure_threshold {
                            warn!(
                                task = name,
                                "Polling paused until the next user interaction"
                            );
                            tokio::select! {
                                _ = resume.notified() => {
                                    info!(task = name, "Polling resumed");
                                    consecutive_failures = 0;
                                }
                                _ = shutdown_rx.changed() => {
                                    if *shutdown_rx.borrow() {
                                        info!(task = name, "Poller shutting down");
                                        break;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        self.handles.push(handle);
    }

    /// Initiate graceful shutdown. Returns immediately after signaling.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for the poll loop to finish, up to `timeout`.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!("Poll task panicked: {}", e);
                }
            }
        };

        match tokio::time::timeout(timeout, drain).await {
            Ok(()) => info!("Poller stopped"),
            Err(_) => warn!("Poller shutdown timed out after {:?}", timeout),
        }
    }
}

/// Delay before the next tick: the base interval on a clean streak,
/// `base * 2^failures` capped at `max` after failures.
fn backoff_delay(base: Duration, consecutive_failures: u32, max: Duration) -> Duration {
    if consecutive_failures == 0 {
        return base;
    }
    let exponent = consecutive_failures.min(10);
    base.saturating_mul(1u32 << exponent).min(max)
}

/// Spread a delay by up to `ratio` in either direction.
fn apply_jitter(delay: Duration, ratio: f64, rng: &mut impl Rng) -> Duration {
    if ratio <= 0.0 || delay.is_zero() {
        return delay;
    }
    let spread = delay.as_secs_f64() * ratio;
    let offset = rng.gen_range(-spread..=spread);
    Duration::from_secs_f64((delay.as_secs_f64() + offset).max(0.0))
}
