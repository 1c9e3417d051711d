//! `run` and `check` commands.

use stockwatch_core::{AppConfig, StateStore};
use stockwatch_locator::StoreDirectoryClient;
use stockwatch_monitor::{CycleReport, Monitor, MonitorOptions};
use stockwatch_notify::WebhookNotifier;
use tokio::sync::watch;

fn build_monitor(
    config: &AppConfig,
    store: StateStore,
) -> anyhow::Result<Monitor<StoreDirectoryClient, WebhookNotifier>> {
    let source = StoreDirectoryClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build store directory client: {e}"))?;
    let notifier = WebhookNotifier::new()
        .map_err(|e| anyhow::anyhow!("failed to build webhook client: {e}"))?;
    Ok(Monitor::new(
        store,
        source,
        notifier,
        MonitorOptions::from_app_config(config),
    ))
}

/// Polls until Ctrl-C or SIGTERM. A signal received mid-check takes effect
/// once that check has finished.
pub(crate) async fn run_monitor(config: &AppConfig, store: StateStore) -> anyhow::Result<()> {
    let mut monitor = build_monitor(config, store)?;

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(true);
    });

    monitor.run(stop_rx, print_report).await?;
    Ok(())
}

pub(crate) async fn run_single_check(config: &AppConfig, store: StateStore) -> anyhow::Result<()> {
    let mut monitor = build_monitor(config, store)?;
    let report = monitor.run_cycle().await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &CycleReport) {
    println!("{}", render_report(report));
}

pub(crate) fn render_report(report: &CycleReport) -> String {
    let mut lines: Vec<String> = report
        .events
        .iter()
        .map(|event| {
            format!(
                "Store ID: {}, Name and Address: {} {}, Availability: {}",
                event.store_id, event.name, event.address, event.available
            )
        })
        .collect();
    for id in &report.missing {
        lines.push(format!("Store ID: {id} not found in {}", report.region));
    }
    if report.delivery_failures > 0 {
        lines.push(format!(
            "{} webhook notification(s) failed; see log",
            report.delivery_failures
        ));
    }
    lines.push(format!(
        "Checked at: {}",
        report
            .checked_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
    ));
    lines.join("\n")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping after the current check");
}
