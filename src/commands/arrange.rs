use anyhow::Result;

use crate::commands::{CommandReport, audit_ok};
use crate::error::OrganizerError;
use crate::organizer::arrange::arrange_versions;
use crate::organizer::config::load_config;
use crate::organizer::fsops::RealFs;
use crate::organizer::naming::FolderType;
use crate::organizer::paths::resolve_paths;

#[derive(Debug, Clone)]
pub struct ArrangeOptions {
    pub album: String,
    pub project: String,
    pub folder: FolderType,
}

/// Renumber a folder's conventional files by modification time, oldest
/// first, restarting the counter per extension.
pub fn run(opts: &ArrangeOptions) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let fs = RealFs;
    let mut report = CommandReport::new("arrange");

    let folder_dir = paths.folder_dir(&opts.album, &opts.project, opts.folder);
    let semantic_type = opts
        .folder
        .semantic_type(None, cfg.naming.distinct_daw_types);

    match arrange_versions(
        &fs,
        &folder_dir,
        &opts.project,
        &semantic_type,
        cfg.naming.separator,
    ) {
        Ok(outcome) => {
            report.detail(format!(
                "folder={} renamed={} skipped={}",
                opts.folder.dir_name(),
                outcome.renamed,
                outcome.skipped
            ));
            if outcome.renamed > 0 {
                audit_ok(
                    &paths,
                    "arrange",
                    &format!(
                        "{}/{}/{}: {} files",
                        opts.album,
                        opts.project,
                        opts.folder.dir_name(),
                        outcome.renamed
                    ),
                );
            }
        }
        Err(OrganizerError::NoConventionalFiles(_)) => {
            report.issue("no conventional files to arrange");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(report)
}
