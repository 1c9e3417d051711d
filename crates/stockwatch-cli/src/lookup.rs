//! `lookup` command: find watchable store ids by city.

use stockwatch_core::{AppConfig, Region, StateStore};
use stockwatch_locator::{resolve, CityResolution, StoreDirectoryClient};

pub(crate) async fn run_lookup(
    config: &AppConfig,
    store: &StateStore,
    city: &str,
    region_override: Option<Region>,
) -> anyhow::Result<()> {
    let region = match region_override {
        Some(region) => region,
        None => store.load_region()?.ok_or_else(|| {
            anyhow::anyhow!("no region selected; run `stockwatch set-region <CODE>` or pass --region")
        })?,
    };

    let client = StoreDirectoryClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build store directory client: {e}"))?;
    let snapshot = client.fetch_region(region).await?;
    tracing::debug!(%region, locations = snapshot.locations().len(), "snapshot fetched for lookup");

    println!("{}", render_resolution(city, &resolve(city, &snapshot)));
    Ok(())
}

pub(crate) fn render_resolution(query: &str, resolution: &CityResolution<'_>) -> String {
    match resolution {
        CityResolution::Exact(locations) => locations
            .iter()
            .map(|loc| format!("Store ID: {}, Address: {}", loc.id, loc.address1))
            .collect::<Vec<_>>()
            .join("\n"),
        CityResolution::Suggestions(cities) if cities.is_empty() => {
            format!("No stores found for '{query}'.")
        }
        CityResolution::Suggestions(cities) => {
            format!(
                "No stores found for '{query}'. Did you mean: {}?",
                cities.join(", ")
            )
        }
    }
}
