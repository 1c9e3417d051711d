//! Polling scheduler.
//!
//! Two states: *Checking* (fetch, classify, dispatch; never interrupted) and
//! *Idle* (a one-second countdown over the persisted interval). The loop
//! leaves only when the stop signal fires during Idle, or on a fetch error
//! under [`FetchFailurePolicy::Exit`].
//!
//! State files are re-read at the top of every Checking pass, so edits made
//! while the monitor runs apply from the next cycle.

use std::collections::HashSet;
use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};
use stockwatch_core::{
    AppConfig, AvailabilityEvent, FetchFailurePolicy, NotifyPolicy, Region, StateStore,
};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::checker::check;
use crate::error::MonitorError;
use crate::source::{Notifier, SnapshotSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorOptions {
    pub fetch_failure_policy: FetchFailurePolicy,
    pub notify_policy: NotifyPolicy,
    /// Render the countdown on stderr while Idle.
    pub show_countdown: bool,
}

impl MonitorOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            fetch_failure_policy: config.fetch_failure_policy,
            notify_policy: config.notify_policy,
            show_countdown: config.show_countdown,
        }
    }
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            fetch_failure_policy: FetchFailurePolicy::Skip,
            notify_policy: NotifyPolicy::EveryCycle,
            show_countdown: false,
        }
    }
}

/// Result of one Checking pass.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub region: Region,
    pub checked_at: DateTime<Utc>,
    /// One event per watched store present in the snapshot, watch-list order.
    pub events: Vec<AvailabilityEvent>,
    /// Watched ids the snapshot did not contain.
    pub missing: Vec<String>,
    pub webhook_configured: bool,
    pub dispatched: usize,
    pub delivery_failures: usize,
    /// Available stores not re-sent because of [`NotifyPolicy::OnChange`].
    pub suppressed: usize,
}

pub struct Monitor<S, N> {
    store: StateStore,
    source: S,
    notifier: N,
    options: MonitorOptions,
    interval: Duration,
    /// Stores already notified under [`NotifyPolicy::OnChange`].
    latched: HashSet<String>,
}

impl<S, N> Monitor<S, N>
where
    S: SnapshotSource,
    N: Notifier,
{
    #[must_use]
    pub fn new(store: StateStore, source: S, notifier: N, options: MonitorOptions) -> Self {
        Self {
            store,
            source,
            notifier,
            options,
            interval: Duration::ZERO,
            latched: HashSet::new(),
        }
    }

    /// Interval the next Idle phase will count down.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Checks the start preconditions against the persisted state.
    ///
    /// # Errors
    ///
    /// - [`MonitorError::Config`] if a state file exists but cannot be read.
    /// - [`MonitorError::EmptyWatchList`] if no store is watched.
    /// - [`MonitorError::IntervalUnset`] if the interval is zero.
    /// - [`MonitorError::RegionUnset`] if no region is selected.
    pub fn preflight(&mut self) -> Result<(), MonitorError> {
        if self.store.load_watch_list()?.is_empty() {
            return Err(MonitorError::EmptyWatchList);
        }
        let config = self.store.load_monitor_config()?;
        if config.interval.is_zero() {
            return Err(MonitorError::IntervalUnset);
        }
        if config.region.is_none() {
            return Err(MonitorError::RegionUnset);
        }
        if config.webhook.is_none() {
            tracing::warn!("no webhook configured; availability will only be reported locally");
        }
        self.interval = config.interval;
        Ok(())
    }

    /// Runs one Checking pass: reload state, fetch, classify, dispatch.
    ///
    /// Delivery failures are counted in the report and never abort the pass.
    ///
    /// # Errors
    ///
    /// - [`MonitorError::Config`] if state cannot be read.
    /// - [`MonitorError::EmptyWatchList`] / [`MonitorError::RegionUnset`] if
    ///   the state no longer allows a check.
    /// - [`MonitorError::Fetch`] if the directory fetch fails after retries.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, MonitorError> {
        let watch_list = self.store.load_watch_list()?;
        if watch_list.is_empty() {
            return Err(MonitorError::EmptyWatchList);
        }
        let config = self.store.load_monitor_config()?;
        if config.interval.is_zero() {
            tracing::warn!(
                interval_secs = self.interval.as_secs(),
                "persisted interval is unset; keeping the previous interval"
            );
        } else {
            self.interval = config.interval;
        }
        let region = config.region.ok_or(MonitorError::RegionUnset)?;

        let snapshot = self.source.fetch(region).await?;
        tracing::debug!(
            %region,
            locations = snapshot.locations().len(),
            "store directory snapshot fetched"
        );

        let events = check(&snapshot, &watch_list);
        let mut missing: Vec<String> = Vec::new();
        for id in &watch_list {
            if snapshot.find(id).is_none() && !missing.contains(id) {
                missing.push(id.clone());
            }
        }
        if !missing.is_empty() {
            tracing::debug!(?missing, "watched stores not present in snapshot");
        }

        let mut report = CycleReport {
            region,
            checked_at: Utc::now(),
            events: Vec::new(),
            missing,
            webhook_configured: config.webhook.is_some(),
            dispatched: 0,
            delivery_failures: 0,
            suppressed: 0,
        };

        for event in &events {
            tracing::info!(
                store_id = %event.store_id,
                name = %event.name,
                address = %event.address,
                available = event.available,
                "store availability"
            );
            self.dispatch_event(config.webhook.as_deref(), event, &mut report)
                .await;
        }

        report.events = events;
        report.checked_at = Utc::now();
        Ok(report)
    }

    async fn dispatch_event(
        &mut self,
        webhook: Option<&str>,
        event: &AvailabilityEvent,
        report: &mut CycleReport,
    ) {
        let latching = self.options.notify_policy == NotifyPolicy::OnChange;

        if !event.available {
            if latching {
                self.latched.remove(&event.store_id);
            }
            return;
        }
        if latching && self.latched.contains(&event.store_id) {
            report.suppressed += 1;
            return;
        }
        let Some(url) = webhook else {
            return;
        };

        match self.notifier.notify(url, event).await {
            Ok(()) => {
                report.dispatched += 1;
                if latching {
                    self.latched.insert(event.store_id.clone());
                }
            }
            Err(e) => {
                report.delivery_failures += 1;
                tracing::warn!(
                    store_id = %event.store_id,
                    error = %e,
                    "webhook notification failed"
                );
            }
        }
    }

    /// Runs Checking/Idle cycles until `stop` becomes `true`.
    ///
    /// `on_report` receives each completed pass. Preconditions are checked
    /// once before the first pass; an error there means no pass ran.
    ///
    /// # Errors
    ///
    /// Returns the [`Monitor::preflight`] error, or [`MonitorError::Fetch`]
    /// when a fetch fails under [`FetchFailurePolicy::Exit`].
    pub async fn run<F>(
        &mut self,
        mut stop: watch::Receiver<bool>,
        mut on_report: F,
    ) -> Result<(), MonitorError>
    where
        F: FnMut(&CycleReport),
    {
        self.preflight()?;
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            notify_policy = %self.options.notify_policy,
            fetch_failure_policy = %self.options.fetch_failure_policy,
            "monitor started"
        );

        loop {
            if *stop.borrow() {
                break;
            }

            match self.run_cycle().await {
                Ok(report) => on_report(&report),
                Err(MonitorError::Fetch(e))
                    if self.options.fetch_failure_policy == FetchFailurePolicy::Exit =>
                {
                    tracing::error!(error = %e, "store directory fetch failed; stopping monitor");
                    return Err(MonitorError::Fetch(e));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "check skipped; retrying next cycle");
                }
            }

            tokio::select! {
                () = countdown(self.interval, self.options.show_countdown) => {}
                () = stop_requested(&mut stop) => break,
            }
        }

        tracing::info!("monitor stopped");
        Ok(())
    }
}

/// Waits out `total` in one-second steps, optionally rendering the seconds
/// left on stderr.
async fn countdown(total: Duration, show: bool) {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let mut stderr = std::io::stderr();
    let mut remaining = total.as_secs();
    while remaining > 0 {
        if show {
            let _ = write!(
                stderr,
                "\rLeave this terminal open, next check in {remaining} seconds   "
            );
            let _ = stderr.flush();
        }
        ticker.tick().await;
        remaining -= 1;
    }
    if show {
        let _ = writeln!(stderr);
    }
}

/// Resolves once the stop flag is set. Never resolves if the sender is gone.
async fn stop_requested(stop: &mut watch::Receiver<bool>) {
    if stop.wait_for(|stopped| *stopped).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
