//! One-time migration between the two counter-separator conventions. Walks
//! every project subfolder and rewrites conventional names whose separator
//! differs from the configured one. Targets carry the new separator and
//! sources the old, so no source is ever another file's target; a target
//! already taken by a pre-existing file is a conflict, warned and skipped.

use crate::error::{OrganizerError, Result};
use crate::organizer::fsops::FsGateway;
use crate::organizer::naming::{self, ALL_FOLDERS, Separator};
use crate::organizer::paths::{OrganizerPaths, RESERVED_ROOT_DIRS};
use crate::organizer::warnings;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrateOutcome {
    pub renamed: usize,
    pub conflicts: usize,
}

fn migrate_folder(
    fs: &dyn FsGateway,
    dir: &Path,
    separator: Separator,
    outcome: &mut MigrateOutcome,
) -> Result<()> {
    for entry in fs.list_entries(dir)? {
        if entry.is_dir {
            continue;
        }
        let Some(target) = naming::with_separator(&entry.name, separator) else {
            continue;
        };
        let target_path = dir.join(&target);
        if fs.exists(&target_path) {
            outcome.conflicts += 1;
            warnings::emit("SEPARATOR_CONFLICT", "migrate", &entry.name, "skipped");
            continue;
        }
        fs.rename(&dir.join(&entry.name), &target_path)?;
        outcome.renamed += 1;
    }
    Ok(())
}

pub fn migrate_tree(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    separator: Separator,
) -> Result<MigrateOutcome> {
    if !fs.exists(&paths.root) {
        return Err(OrganizerError::NotFound(paths.root.display().to_string()));
    }

    let mut outcome = MigrateOutcome::default();
    for album in fs.list_entries(&paths.root)? {
        if !album.is_dir
            || album.name.starts_with('.')
            || RESERVED_ROOT_DIRS.contains(&album.name.as_str())
        {
            continue;
        }
        let album_dir = paths.album_dir(&album.name);
        for project in fs.list_entries(&album_dir)? {
            if !project.is_dir {
                continue;
            }
            for folder in ALL_FOLDERS {
                let dir = album_dir.join(&project.name).join(folder.dir_name());
                if fs.exists(&dir) {
                    migrate_folder(fs, &dir, separator, &mut outcome)?;
                }
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizer::fsops::mem::MemFs;
    use std::path::PathBuf;

    fn setup() -> (MemFs, OrganizerPaths, PathBuf) {
        let fs = MemFs::new();
        let root = PathBuf::from("/root/Norfeusz");
        let paths = OrganizerPaths {
            root: root.clone(),
            sortownia_dir: root.join("Sortownia"),
            logs_dir: root.join(".norf"),
        };
        let tekst = root.join("Ep").join("01 - a").join("Tekst");
        fs.ensure_dir(&tekst).unwrap();
        (fs, paths, tekst)
    }

    #[test]
    fn dash_names_move_to_underscore() {
        let (fs, paths, tekst) = setup();
        fs.add_file(tekst.join("a-tekst-001.txt"), b"x");
        fs.add_file(tekst.join("a-tekst_002.txt"), b"y");
        fs.add_file(tekst.join("luzem.txt"), b"z");

        let outcome = migrate_tree(&fs, &paths, Separator::Underscore).unwrap();
        assert_eq!(outcome.renamed, 1);
        assert_eq!(outcome.conflicts, 0);
        assert!(fs.exists(&tekst.join("a-tekst_001.txt")));
        assert!(fs.exists(&tekst.join("luzem.txt")));
    }

    #[test]
    fn taken_targets_are_skipped_not_clobbered() {
        let (fs, paths, tekst) = setup();
        fs.add_file(tekst.join("a-tekst-001.txt"), b"dash");
        fs.add_file(tekst.join("a-tekst_001.txt"), b"underscore");

        let outcome = migrate_tree(&fs, &paths, Separator::Underscore).unwrap();
        assert_eq!(outcome.renamed, 0);
        assert_eq!(outcome.conflicts, 1);
        assert_eq!(
            fs.file_data(&tekst.join("a-tekst_001.txt")),
            Some(b"underscore".to_vec())
        );
        assert_eq!(
            fs.file_data(&tekst.join("a-tekst-001.txt")),
            Some(b"dash".to_vec())
        );
    }

    #[test]
    fn staging_and_shared_folders_are_left_alone() {
        let (fs, paths, _) = setup();
        fs.ensure_dir(&paths.sortownia_dir).unwrap();
        fs.add_file(paths.sortownia_dir.join("a-tekst-001.txt"), b"x");

        migrate_tree(&fs, &paths, Separator::Underscore).unwrap();
        assert!(fs.exists(&paths.sortownia_dir.join("a-tekst-001.txt")));
    }
}
