use anyhow::Result;

use crate::commands::{CommandReport, audit_ok};
use crate::organizer::config::load_config;
use crate::organizer::fsops::RealFs;
use crate::organizer::migrate::migrate_tree;
use crate::organizer::paths::resolve_paths;

/// One-time pass rewriting convention names to the configured separator.
pub fn run() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let fs = RealFs;
    let mut report = CommandReport::new("migrate-naming");

    let outcome = migrate_tree(&fs, &paths, cfg.naming.separator)?;
    report.detail(format!(
        "renamed={} conflicts={}",
        outcome.renamed, outcome.conflicts
    ));
    if outcome.conflicts > 0 {
        report.issue(format!(
            "{} files kept their old separator because the target name was taken",
            outcome.conflicts
        ));
    }
    if outcome.renamed > 0 {
        audit_ok(
            &paths,
            "migrate-naming",
            &format!("{} files renamed", outcome.renamed),
        );
    }
    Ok(report)
}
