use crate::error::{OrganizerError, Result};
use crate::organizer::fsops::FsGateway;
use crate::organizer::warnings;
use std::collections::BTreeSet;
use std::path::Path;

/// One rename inside a single directory. Cascade shifts, bulk renumbers and
/// the version arranger all reduce to an ordered list of these, precomputed
/// up front so the collision-avoidance invariant can be checked without
/// touching a filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    pub from: String,
    pub to: String,
}

impl RenameStep {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Replay `steps` against the starting set of names and fail on the first
/// step whose target is still occupied. A step whose source is absent is
/// treated as stale and skipped, mirroring the executor.
pub fn check_no_clobber(initial: &BTreeSet<String>, steps: &[RenameStep]) -> Result<()> {
    let mut names = initial.clone();
    for step in steps {
        if !names.remove(&step.from) {
            continue;
        }
        if names.contains(&step.to) {
            return Err(OrganizerError::NameCollision(step.to.clone()));
        }
        names.insert(step.to.clone());
    }
    Ok(())
}

/// Execute the plan strictly in order. Entries whose source vanished since
/// the plan was built are warned about and skipped rather than aborting the
/// batch. Returns the number of renames actually performed.
pub fn execute(fs: &dyn FsGateway, dir: &Path, steps: &[RenameStep]) -> Result<usize> {
    let mut renamed = 0usize;
    for step in steps {
        let from = dir.join(&step.from);
        if !fs.exists(&from) {
            warnings::emit("STALE_RENAME_SOURCE", "rename-plan", &step.from, "skipped");
            continue;
        }
        fs.rename(&from, &dir.join(&step.to))?;
        renamed += 1;
    }
    Ok(renamed)
}
