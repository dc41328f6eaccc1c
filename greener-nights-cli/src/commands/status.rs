use anyhow::Result;
use greener_nights_core::{SyncConfig, SyncOptions};
use owo_colors::OwoColorize;

pub fn run(config: &SyncConfig, verbose: bool) -> Result<()> {
    let outcome = greener_nights_core::sync(config, SyncOptions { dry_run: true })?;

    super::print_changes(&config.store_path(), &outcome, verbose);

    let stats = &outcome.stats;
    if stats.new > 0 || stats.updated > 0 {
        println!(
            "\nWould sync: {} new, {} updated ({} kept from history)",
            stats.new, stats.updated, stats.preserved
        );
    } else {
        println!("\n{}", "Calendar is up to date".dimmed());
    }

    Ok(())
}
