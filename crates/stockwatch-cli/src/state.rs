//! Handlers for the commands that edit or print the persisted state.
//!
//! A running monitor picks up every edit made here on its next cycle.

use std::time::Duration;

use stockwatch_core::{Region, StateStore};

pub(crate) fn add_stores(store: &StateStore, ids: &[String]) -> anyhow::Result<()> {
    for id in ids {
        store.append_to_watch_list(id)?;
        println!("watching store {}", id.trim());
    }
    Ok(())
}

pub(crate) fn set_interval(store: &StateStore, hours: u64) -> anyhow::Result<()> {
    let interval = Duration::from_secs(hours.saturating_mul(3600));
    store.save_interval(interval)?;
    println!("check interval set to {hours}h");
    Ok(())
}

pub(crate) fn set_region(store: &StateStore, region: Region) -> anyhow::Result<()> {
    store.save_region(region)?;
    println!("region set to {region}");
    Ok(())
}

/// Persists the webhook after checking it is an absolute URL.
///
/// # Errors
///
/// Returns an error if `url` does not parse or cannot be written.
pub(crate) fn set_webhook(store: &StateStore, url: &str) -> anyhow::Result<()> {
    let trimmed = url.trim();
    reqwest::Url::parse(trimmed)
        .map_err(|e| anyhow::anyhow!("invalid webhook URL: {e}"))?;
    store.save_webhook(trimmed)?;
    println!("webhook saved");
    Ok(())
}

pub(crate) fn print_status(store: &StateStore) -> anyhow::Result<()> {
    println!("{}", render_status(store)?);
    Ok(())
}

/// Renders the persisted state. The webhook URL carries a token, so only
/// its presence is shown.
pub(crate) fn render_status(store: &StateStore) -> anyhow::Result<String> {
    let watch_list = store.load_watch_list()?;
    let config = store.load_monitor_config()?;

    let mut out = String::new();
    if watch_list.is_empty() {
        out.push_str("watch list: (empty)\n");
    } else {
        out.push_str(&format!("watch list ({}):\n", watch_list.len()));
        for id in &watch_list {
            out.push_str(&format!("  {id}\n"));
        }
    }

    let hours = config.interval.as_secs() / 3600;
    if hours == 0 {
        out.push_str("interval: (unset)\n");
    } else {
        out.push_str(&format!("interval: {hours}h\n"));
    }

    match config.region {
        Some(region) => out.push_str(&format!("region: {region}\n")),
        None => out.push_str("region: (unset)\n"),
    }

    let webhook = if config.webhook.is_some() {
        "configured"
    } else {
        "(unset)"
    };
    out.push_str(&format!("webhook: {webhook}"));
    Ok(out)
}
