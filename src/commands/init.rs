use anyhow::Result;

use crate::commands::{CommandReport, audit_ok};
use crate::organizer::config::load_config;
use crate::organizer::fsops::{FsGateway, RealFs};
use crate::organizer::paths::resolve_paths;

/// Create the root layout: the library root, the default album and the
/// staging folder. Safe to run repeatedly.
pub fn run() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let fs = RealFs;
    let mut report = CommandReport::new("init");

    report.detail(format!("root={}", paths.root.display()));

    let mut created = Vec::new();
    for dir in [
        paths.root.clone(),
        paths.album_dir(&cfg.projects.default_album),
        paths.sortownia_dir.clone(),
    ] {
        if !fs.exists(&dir) {
            fs.ensure_dir(&dir)?;
            created.push(dir.display().to_string());
        }
    }

    if created.is_empty() {
        report.detail("already initialized");
    } else {
        for dir in &created {
            report.detail(format!("created {dir}"));
        }
        audit_ok(&paths, "init", &created.join(", "));
    }

    Ok(report)
}
