use crate::connections::ConnectionSet;
use jiff::Timestamp;
use serde::Serialize;
use shrinkray_core::Role;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use typed_builder::TypedBuilder;

/// Liveness monitor settings.
///
/// The monitor gives up once the failure counter exceeds
/// `base_threshold * multiple`.
#[derive(Debug, Clone, TypedBuilder)]
pub struct LivenessConfig {
    #[builder(default = Duration::from_secs(10))]
    pub interval: Duration,
    #[builder(default = 100)]
    pub base_threshold: u64,
    #[builder(default = 3)]
    pub multiple: u64,
}

impl LivenessConfig {
    pub fn fatal_limit(&self) -> u64 {
        self.base_threshold.saturating_mul(self.multiple)
    }
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// The last cycle reached every connection.
    Healthy,
    /// Pings have failed since the last fully successful cycle.
    Degraded,
    /// The failure counter went past the fatal limit. Terminal.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub state: HealthState,
    pub consecutive_failures: u64,
    /// `None` until the first cycle completes.
    pub checked_at: Option<Timestamp>,
}

impl HealthReport {
    fn initial() -> Self {
        Self {
            state: HealthState::Healthy,
            consecutive_failures: 0,
            checked_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error("store pings failed {failures} times, limit is {limit}")]
    Fatal { failures: u64, limit: u64 },
}

/// Background health checker for a [`ConnectionSet`].
///
/// Every cycle pings the admin, getter and pusher connections in turn. Each
/// failed ping adds one to the failure counter; only a cycle in which all
/// three pings succeed resets it. State changes are published on a watch
/// channel.
pub struct LivenessMonitor {
    connections: ConnectionSet,
    config: LivenessConfig,
    failures: u64,
    tx: watch::Sender<HealthReport>,
}

impl LivenessMonitor {
    pub fn new(connections: ConnectionSet, config: LivenessConfig) -> Self {
        let (tx, _rx) = watch::channel(HealthReport::initial());
        Self {
            connections,
            config,
            failures: 0,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthReport> {
        self.tx.subscribe()
    }

    pub fn report(&self) -> HealthReport {
        self.tx.borrow().clone()
    }

    /// Runs one ping cycle and publishes the resulting report.
    pub async fn check(&mut self) -> HealthReport {
        let mut cycle_failures = 0;
        for role in Role::ALL {
            if let Err(e) = self.connections.connection(role).ping().await {
                warn!(role = %role, error = %e, "store ping failed");
                cycle_failures += 1;
            }
        }

        if cycle_failures == 0 {
            if self.failures > 0 {
                info!(previous_failures = self.failures, "store connections recovered");
            }
            self.failures = 0;
        } else {
            self.failures = self.failures.saturating_add(cycle_failures);
        }

        let state = if self.failures > self.config.fatal_limit() {
            HealthState::Failed
        } else if self.failures > 0 {
            HealthState::Degraded
        } else {
            HealthState::Healthy
        };

        let report = HealthReport {
            state,
            consecutive_failures: self.failures,
            checked_at: Some(Timestamp::now()),
        };
        debug!(state = ?report.state, failures = report.consecutive_failures, "liveness check");
        self.tx.send_replace(report.clone());
        report
    }

    /// Pings on the configured interval until the fatal limit is crossed.
    ///
    /// Only returns on failure; drop the future to stop monitoring.
    pub async fn run(mut self) -> Result<(), MonitorError> {
        info!(
            interval = ?self.config.interval,
            fatal_limit = self.config.fatal_limit(),
            "starting liveness monitor"
        );
        loop {
            let report = self.check().await;
            if report.state == HealthState::Failed {
                let err = MonitorError::Fatal {
                    failures: report.consecutive_failures,
                    limit: self.config.fatal_limit(),
                };
                error!(error = %err, "liveness monitor giving up");
                return Err(err);
            }
            tokio::time::sleep(self.config.interval).await;
        }
    }
}
