use std::time::Duration;

use chrono::Utc;
use stockwatch_core::AvailabilityEvent;
use stockwatch_locator::{resolve, Location, StoreSnapshot};
use stockwatch_monitor::CycleReport;

use super::*;

fn scratch_store() -> StateStore {
    StateStore::new(std::env::temp_dir().join(format!("stockwatch-cli-{}", uuid::Uuid::new_v4())))
}

#[test]
fn parses_add_store_with_several_ids() {
    let cli = Cli::try_parse_from(["stockwatch", "add-store", "IT001", "IT002"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::AddStore { ref ids } if ids == &["IT001", "IT002"]
    ));
}

#[test]
fn add_store_requires_an_id() {
    assert!(Cli::try_parse_from(["stockwatch", "add-store"]).is_err());
}

#[test]
fn parses_set_interval_hours() {
    let cli = Cli::try_parse_from(["stockwatch", "set-interval", "6"]).unwrap();
    assert!(matches!(cli.command, Commands::SetInterval { hours: 6 }));
}

#[test]
fn set_interval_rejects_zero() {
    assert!(Cli::try_parse_from(["stockwatch", "set-interval", "0"]).is_err());
}

#[test]
fn parses_set_region_case_insensitively() {
    let cli = Cli::try_parse_from(["stockwatch", "set-region", "de"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::SetRegion { region: Region::De }
    ));
}

#[test]
fn set_region_rejects_unknown_code() {
    assert!(Cli::try_parse_from(["stockwatch", "set-region", "ES"]).is_err());
}

#[test]
fn parses_lookup_with_region_override() {
    let cli = Cli::try_parse_from(["stockwatch", "lookup", "Milano", "--region", "IT"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Lookup { ref city, region: Some(Region::It) } if city == "Milano"
    ));
}

#[test]
fn parses_run_and_check() {
    let run = Cli::try_parse_from(["stockwatch", "run"]).unwrap();
    assert!(matches!(run.command, Commands::Run));
    let check = Cli::try_parse_from(["stockwatch", "check"]).unwrap();
    assert!(matches!(check.command, Commands::Check));
}

#[test]
fn help_and_usage_errors_come_from_clap() {
    let help = Cli::try_parse_from(["stockwatch", "--help"]).unwrap_err();
    assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    let usage = Cli::try_parse_from(["stockwatch", "frobnicate"]).unwrap_err();
    assert_eq!(usage.kind(), clap::error::ErrorKind::InvalidSubcommand);
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["stockwatch"]).is_err());
}

#[test]
fn set_webhook_rejects_unparseable_url() {
    let store = scratch_store();
    assert!(state::set_webhook(&store, "not a url").is_err());
    assert_eq!(store.load_webhook().unwrap(), None);
}

#[test]
fn state_commands_persist_and_render() {
    let store = scratch_store();
    state::add_stores(&store, &["IT001".to_string(), "IT002".to_string()]).unwrap();
    state::set_interval(&store, 2).unwrap();
    state::set_region(&store, Region::Fr).unwrap();
    state::set_webhook(&store, " https://hooks.example/api/webhooks/1/secret ").unwrap();

    assert_eq!(store.load_interval().unwrap(), Duration::from_secs(7200));
    assert_eq!(
        store.load_webhook().unwrap().as_deref(),
        Some("https://hooks.example/api/webhooks/1/secret")
    );

    let status = state::render_status(&store).unwrap();
    assert!(status.contains("watch list (2):"));
    assert!(status.contains("  IT002"));
    assert!(status.contains("interval: 2h"));
    assert!(status.contains("region: FR"));
    assert!(status.contains("webhook: configured"));
    assert!(!status.contains("secret"), "webhook token must not be printed");
}

#[test]
fn status_of_fresh_state_shows_unset_fields() {
    let status = state::render_status(&scratch_store()).unwrap();
    assert!(status.contains("watch list: (empty)"));
    assert!(status.contains("interval: (unset)"));
    assert!(status.contains("region: (unset)"));
    assert!(status.contains("webhook: (unset)"));
}

fn store_in(id: &str, city: &str) -> Location {
    Location {
        id: id.to_string(),
        city: city.to_string(),
        address1: format!("Via {id}"),
        ..Location::default()
    }
}

#[test]
fn lookup_lists_exact_matches() {
    let snapshot = StoreSnapshot::from_locations(vec![
        store_in("IT001", "MILANO"),
        store_in("IT002", "ROMA"),
        store_in("IT003", "Milano"),
    ]);
    let text = lookup::render_resolution("milano", &resolve("milano", &snapshot));
    assert_eq!(
        text,
        "Store ID: IT001, Address: Via IT001\nStore ID: IT003, Address: Via IT003"
    );
}

#[test]
fn lookup_offers_suggestions_on_miss() {
    let snapshot = StoreSnapshot::from_locations(vec![
        store_in("IT001", "MILANO"),
        store_in("IT002", "ROMA"),
    ]);
    let text = lookup::render_resolution("Milan", &resolve("Milan", &snapshot));
    assert!(text.starts_with("No stores found for 'Milan'. Did you mean: MILANO"));
}

#[test]
fn lookup_on_empty_snapshot_says_nothing_found() {
    let snapshot = StoreSnapshot::from_locations(Vec::new());
    let text = lookup::render_resolution("Roma", &resolve("Roma", &snapshot));
    assert_eq!(text, "No stores found for 'Roma'.");
}

#[test]
fn report_lists_each_event_and_timestamp() {
    let report = CycleReport {
        region: Region::It,
        checked_at: Utc::now(),
        events: vec![AvailabilityEvent {
            store_id: "IT001".to_string(),
            name: "SEPHORA MILANO".to_string(),
            address: "Piazza del Duomo 1".to_string(),
            available: true,
        }],
        missing: vec!["IT404".to_string()],
        webhook_configured: true,
        dispatched: 1,
        delivery_failures: 0,
        suppressed: 0,
    };
    let text = monitor::render_report(&report);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Store ID: IT001, Name and Address: SEPHORA MILANO Piazza del Duomo 1, Availability: true"
    );
    assert_eq!(lines[1], "Store ID: IT404 not found in IT");
    assert!(lines[2].starts_with("Checked at: "));
}
