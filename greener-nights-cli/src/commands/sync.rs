use anyhow::Result;
use greener_nights_core::{SyncConfig, SyncOptions};

use crate::render::Render;

pub fn run(config: &SyncConfig, verbose: bool) -> Result<()> {
    let outcome = greener_nights_core::sync(config, SyncOptions::default())?;

    super::print_changes(&config.store_path(), &outcome, verbose);
    println!("\n{}", outcome.stats.render());

    Ok(())
}
