use anyhow::{Result, anyhow};

use crate::commands::{CommandReport, audit_ok};
use crate::organizer::fsops::RealFs;
use crate::organizer::numbering;
use crate::organizer::paths::resolve_paths;

pub fn next_number(album_id: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("next-number");

    let number = numbering::next_available_number(&fs, &paths.album_dir(album_id))?;
    report.detail(format!("album={album_id} next={number}"));
    report.data(number);
    Ok(report)
}

pub fn assign(album_id: &str, project_name: &str, number: i64) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("assign-number");

    let new_name = numbering::assign_number(&fs, &paths.album_dir(album_id), project_name, number)?;
    report.detail(format!("{project_name} -> {new_name}"));
    audit_ok(
        &paths,
        "assign-number",
        &format!("{album_id}/{project_name} -> {new_name}"),
    );
    Ok(report)
}

/// One `NAME=NN` pair per argument, applied as a batch.
fn parse_mapping(pairs: &[String]) -> Result<Vec<(String, u32)>> {
    let mut mapping = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let (name, number) = pair
            .rsplit_once('=')
            .ok_or_else(|| anyhow!("expected NAME=NN, got \"{pair}\""))?;
        let number: u32 = number
            .trim()
            .parse()
            .map_err(|_| anyhow!("invalid number in \"{pair}\""))?;
        if name.is_empty() || number == 0 {
            return Err(anyhow!("invalid mapping entry \"{pair}\""));
        }
        mapping.push((name.to_string(), number));
    }
    Ok(mapping)
}

pub fn renumber(album_id: &str, pairs: &[String]) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("renumber");

    let mapping = parse_mapping(pairs)?;
    let outcome = numbering::renumber_all(&fs, &paths.album_dir(album_id), &mapping)?;
    report.detail(format!(
        "renamed={} unchanged={} stale={}",
        outcome.renamed, outcome.unchanged, outcome.stale
    ));
    if outcome.stale > 0 {
        report.issue(format!("{} mapping entries no longer exist", outcome.stale));
    }
    audit_ok(
        &paths,
        "renumber",
        &format!("{album_id}: {} entries", mapping.len()),
    );
    Ok(report)
}
