//! Terminal rendering for merge results.
//!
//! Extension traits that add colored output to greener-nights-core types
//! using owo_colors.

use std::path::Path;

use greener_nights_core::MergeStats;
use greener_nights_core::diff::{ChangeKind, RecordChange};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ChangeKind {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            ChangeKind::Create => symbol.green().to_string(),
            ChangeKind::Update => symbol.yellow().to_string(),
            ChangeKind::Unchanged => symbol.dimmed().to_string(),
        }
    }
}

impl Render for RecordChange {
    fn render(&self) -> String {
        let date = self.date.to_string();
        let date = match self.kind {
            ChangeKind::Create => date.green().to_string(),
            ChangeKind::Update => date.yellow().to_string(),
            ChangeKind::Unchanged => date.dimmed().to_string(),
        };
        format!("{} {} {}", self.kind.render(), date, self.summary.dimmed())
    }
}

impl Render for Path {
    fn render(&self) -> String {
        format!("📅 {}", self.display())
    }
}

/// Above this many records, unchanged ones are summarised as a count.
const COMPACT_THRESHOLD: usize = 5;

/// One line per record; large batches hide unchanged records unless verbose.
pub fn render_changes(changes: &[RecordChange], verbose: bool) -> String {
    if changes.is_empty() {
        return "   No records in feed".dimmed().to_string();
    }

    let compact = !verbose && changes.len() > COMPACT_THRESHOLD;
    let mut lines: Vec<String> = changes
        .iter()
        .filter(|c| !compact || c.kind != ChangeKind::Unchanged)
        .map(|c| format!("   {}", c.render()))
        .collect();

    if compact {
        let unchanged = changes
            .iter()
            .filter(|c| c.kind == ChangeKind::Unchanged)
            .count();
        if unchanged > 0 {
            let label = format!("({} unchanged {})", unchanged, pluralize("event", unchanged));
            lines.push(format!("   {} {}", "=".dimmed(), label.dimmed()));
        }
    }

    lines.join("\n")
}

impl Render for MergeStats {
    fn render(&self) -> String {
        let rule = "=".repeat(60);
        [
            rule.clone(),
            format!("{:<28}{}", "New events added:", self.new.green()),
            format!("{:<28}{}", "Events updated:", self.updated.yellow()),
            format!("{:<28}{}", "Events unchanged:", self.unchanged),
            format!("{:<28}{}", "Historical events kept:", self.preserved),
            format!("{:<28}{}", "Total events in calendar:", self.total.bold()),
            rule,
        ]
        .join("\n")
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn change(day: u32, kind: ChangeKind) -> RecordChange {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        RecordChange {
            kind,
            date,
            uid: format!("greener-night-{}@greener-nights-history", date),
            summary: "✅ Greener Night - Score:  7".to_string(),
        }
    }

    #[test]
    fn test_small_batches_list_every_record() {
        let changes = vec![change(1, ChangeKind::Create), change(2, ChangeKind::Unchanged)];
        let out = render_changes(&changes, false);

        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("2024-01-01"));
        assert!(out.contains("2024-01-02"));
    }

    #[test]
    fn test_large_batches_collapse_unchanged_records() {
        let mut changes: Vec<_> = (1..=8).map(|d| change(d, ChangeKind::Unchanged)).collect();
        changes.push(change(9, ChangeKind::Update));

        let out = render_changes(&changes, false);
        assert_eq!(out.lines().count(), 2, "Got:\n{}", out);
        assert!(out.contains("2024-01-09"));
        assert!(out.contains("8 unchanged events"));

        let verbose = render_changes(&changes, true);
        assert_eq!(verbose.lines().count(), 9);
    }

    #[test]
    fn test_stats_render_lists_every_count() {
        let stats = MergeStats {
            new: 1,
            updated: 2,
            unchanged: 3,
            preserved: 4,
            total: 10,
        };
        let out = stats.render();

        for label in [
            "New events added:",
            "Events updated:",
            "Events unchanged:",
            "Historical events kept:",
            "Total events in calendar:",
        ] {
            assert!(out.contains(label), "Missing {}:\n{}", label, out);
        }
        assert!(out.contains("10"));
    }
}
