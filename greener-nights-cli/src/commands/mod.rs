pub mod status;
pub mod sync;

use greener_nights_core::MergeOutcome;

use crate::render::{Render, render_changes};

/// Change list for one run, under the store it was merged into.
fn print_changes(store: &std::path::Path, outcome: &MergeOutcome, verbose: bool) {
    println!("{}", store.render());
    println!("{}", render_changes(&outcome.changes, verbose));
}
