//! Version Arranger: re-sorts one project subfolder chronologically and
//! re-issues sequential counters per extension group. All renames go through
//! a temp name, and every `from -> temp` step precedes every `temp -> final`
//! step, so a final name still held by a file later in the batch is always
//! vacated before it is claimed. A naive direct loop would destroy a file
//! whenever one file's target equals another file's current name.

use crate::error::{OrganizerError, Result};
use crate::organizer::fsops::FsGateway;
use crate::organizer::naming::{self, Separator};
use crate::organizer::plan::{self, RenameStep};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrangeOutcome {
    /// Files that ended up under a new name.
    pub renamed: usize,
    /// Files skipped because their name does not follow the convention.
    pub skipped: usize,
}

fn lowercase_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx..].to_lowercase(),
        None => String::new(),
    }
}

/// Build the ordered two-phase rename plan for a folder listing. Pure: the
/// plan can be checked with [`plan::check_no_clobber`] before anything moves.
pub fn arrange_plan(
    files: &[(String, SystemTime)],
    project_name: &str,
    semantic_type: &str,
    separator: Separator,
    temp_stamp: u64,
) -> Vec<RenameStep> {
    let mut matching: Vec<&(String, SystemTime)> = files
        .iter()
        .filter(|(name, _)| naming::is_conventional_name(name))
        .collect();
    // Oldest first: chronological order becomes version order.
    matching.sort_by_key(|(_, modified)| *modified);

    let mut by_extension: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for (name, _) in matching {
        by_extension
            .entry(lowercase_extension(name))
            .or_default()
            .push(name);
    }

    let normalized = naming::normalize_project_name(project_name);
    let mut to_temp = Vec::new();
    let mut to_final = Vec::new();
    let mut temp_idx = 0usize;

    for (ext, group) in &by_extension {
        for (i, name) in group.iter().enumerate() {
            let target = format!(
                "{normalized}-{semantic_type}{}{:03}{ext}",
                separator.as_char(),
                i + 1
            );
            if **name == target {
                continue;
            }
            let temp = format!("temp_{temp_stamp}_{temp_idx}{ext}");
            temp_idx += 1;
            to_temp.push(RenameStep::new(*name, temp.clone()));
            to_final.push(RenameStep::new(temp, target));
        }
    }

    to_temp.extend(to_final);
    to_temp
}

/// Arrange the convention-named files of `folder`. Non-matching files are
/// counted and left untouched; an empty matching set is an error.
pub fn arrange_versions(
    fs: &dyn FsGateway,
    folder: &Path,
    project_name: &str,
    semantic_type: &str,
    separator: Separator,
) -> Result<ArrangeOutcome> {
    if !fs.exists(folder) {
        return Err(OrganizerError::NotFound(folder.display().to_string()));
    }

    let files: Vec<(String, SystemTime)> = fs
        .list_entries(folder)?
        .into_iter()
        .filter(|e| !e.is_dir)
        .map(|e| (e.name, e.modified))
        .collect();

    let matching = files
        .iter()
        .filter(|(name, _)| naming::is_conventional_name(name))
        .count();
    if matching == 0 {
        return Err(OrganizerError::NoConventionalFiles(
            folder.display().to_string(),
        ));
    }

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let steps = arrange_plan(&files, project_name, semantic_type, separator, stamp);
    let executed = plan::execute(fs, folder, &steps)?;

    Ok(ArrangeOutcome {
        renamed: executed / 2,
        skipped: files.len() - matching,
    })
}
