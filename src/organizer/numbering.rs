//! Project Numbering Engine: keeps the "NN - name" prefixes of sibling
//! project folders unique within an album. The folder names are the only
//! place a number lives; there is no index file to fall out of sync.

use crate::error::{OrganizerError, Result};
use crate::organizer::fsops::FsGateway;
use crate::organizer::plan::{self, RenameStep};
use crate::organizer::warnings;
use std::collections::BTreeSet;
use std::path::Path;

/// Split a `"NN - name"` folder name into its number and base name. The
/// prefix is exactly two digits followed by a dash with optional whitespace
/// around it; anything else (one digit, three digits, no dash) is not a
/// numbered project.
pub fn split_number(name: &str) -> Option<(u32, &str)> {
    let mut chars = name.char_indices();
    let (_, d1) = chars.next()?;
    let (_, d2) = chars.next()?;
    if !d1.is_ascii_digit() || !d2.is_ascii_digit() {
        return None;
    }
    let number = (d1 as u32 - '0' as u32) * 10 + (d2 as u32 - '0' as u32);

    let mut rest = name[2..].trim_start();
    rest = rest.strip_prefix('-')?;
    Some((number, rest.trim_start()))
}

pub fn extract_number(name: &str) -> Option<u32> {
    split_number(name).map(|(n, _)| n)
}

/// Base name with any numeric prefix removed.
pub fn strip_number(name: &str) -> &str {
    split_number(name).map_or(name, |(_, base)| base)
}

pub fn format_numbered(number: u32, base: &str) -> String {
    format!("{number:02} - {base}")
}

fn sibling_dirs(fs: &dyn FsGateway, album_dir: &Path) -> Result<Vec<String>> {
    if !fs.exists(album_dir) {
        return Err(OrganizerError::NotFound(album_dir.display().to_string()));
    }
    Ok(fs
        .list_entries(album_dir)?
        .into_iter()
        .filter(|e| e.is_dir)
        .map(|e| e.name)
        .collect())
}

/// Next free number in the album: max of the extracted numbers plus one, or
/// 1 when nothing is numbered yet.
pub fn next_available_number(fs: &dyn FsGateway, album_dir: &Path) -> Result<u32> {
    let max = sibling_dirs(fs, album_dir)?
        .iter()
        .filter_map(|name| extract_number(name))
        .max();
    Ok(max.map_or(1, |m| m + 1))
}

/// Rename steps that free `from_number` by shifting every sibling numbered
/// `>= from_number` up by one. Highest number first, so no step ever lands
/// on a name a later step still reads.
pub fn shift_plan(siblings: &[String], from_number: u32) -> Vec<RenameStep> {
    let mut numbered: Vec<(u32, &str, &str)> = siblings
        .iter()
        .filter_map(|name| {
            split_number(name)
                .filter(|(n, _)| *n >= from_number)
                .map(|(n, base)| (n, base, name.as_str()))
        })
        .collect();
    numbered.sort_by(|a, b| b.0.cmp(&a.0));

    numbered
        .into_iter()
        .map(|(n, base, name)| RenameStep::new(name, format_numbered(n + 1, base)))
        .collect()
}

/// Give an unnumbered project a specific number, cascade-shifting any
/// siblings at or above it first. Returns the project's new folder name.
pub fn assign_number(
    fs: &dyn FsGateway,
    album_dir: &Path,
    project_name: &str,
    number: i64,
) -> Result<String> {
    if number < 1 {
        return Err(OrganizerError::InvalidNumber(number));
    }
    let number = number as u32;

    if extract_number(project_name).is_some() {
        return Err(OrganizerError::AlreadyNumbered(project_name.to_string()));
    }

    let siblings = sibling_dirs(fs, album_dir)?;
    if !siblings.iter().any(|s| s == project_name) {
        return Err(OrganizerError::NotFound(
            album_dir.join(project_name).display().to_string(),
        ));
    }

    let taken = siblings
        .iter()
        .any(|s| extract_number(s) == Some(number));
    let mut steps = if taken {
        shift_plan(&siblings, number)
    } else {
        Vec::new()
    };
    let new_name = format_numbered(number, project_name);
    steps.push(RenameStep::new(project_name, new_name.clone()));

    let initial: BTreeSet<String> = siblings.into_iter().collect();
    plan::check_no_clobber(&initial, &steps)?;
    plan::execute(fs, album_dir, &steps)?;
    Ok(new_name)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenumberOutcome {
    pub renamed: usize,
    pub unchanged: usize,
    pub stale: usize,
}

/// Bulk reassignment after a manual reorder. Entries are applied in order;
/// an entry whose folder vanished is warned about and skipped. When a target
/// name is still held by an entry later in the batch, that occupant is
/// evicted to a temporary name first and picked up again by its own entry.
/// A target held by a folder outside the batch is a hard collision.
pub fn renumber_all(
    fs: &dyn FsGateway,
    album_dir: &Path,
    mapping: &[(String, u32)],
) -> Result<RenumberOutcome> {
    let siblings = sibling_dirs(fs, album_dir)?;
    let mut occupied: BTreeSet<String> = siblings.into_iter().collect();
    let mut current: Vec<String> = mapping.iter().map(|(name, _)| name.clone()).collect();

    let mut steps: Vec<RenameStep> = Vec::new();
    let mut outcome = RenumberOutcome::default();
    let mut temp_seq = 0usize;

    for i in 0..mapping.len() {
        let (orig_name, number) = &mapping[i];
        let cur = current[i].clone();

        if !occupied.contains(&cur) {
            outcome.stale += 1;
            warnings::emit("STALE_RENUMBER_ENTRY", "renumber", orig_name, "skipped");
            continue;
        }

        let target = format_numbered(*number, strip_number(orig_name));
        if cur == target {
            outcome.unchanged += 1;
            continue;
        }

        if occupied.contains(&target) {
            let pending = (i + 1..mapping.len()).find(|&j| current[j] == target);
            let Some(j) = pending else {
                return Err(OrganizerError::NameCollision(target));
            };
            let temp = loop {
                temp_seq += 1;
                let candidate = format!("norf-renumber-tmp-{temp_seq}");
                if !occupied.contains(&candidate) {
                    break candidate;
                }
            };
            steps.push(RenameStep::new(target.clone(), temp.clone()));
            occupied.remove(&target);
            occupied.insert(temp.clone());
            current[j] = temp;
        }

        steps.push(RenameStep::new(cur.clone(), target.clone()));
        occupied.remove(&cur);
        occupied.insert(target);
    }

    outcome.renamed = plan::execute(fs, album_dir, &steps)?;
    Ok(outcome)
}

/// Rename a project while keeping its numeric prefix, or plainly when it has
/// none. Returns the new folder name.
pub fn rename_keeping_number(
    fs: &dyn FsGateway,
    album_dir: &Path,
    old_name: &str,
    new_base: &str,
) -> Result<String> {
    let old_path = album_dir.join(old_name);
    if !fs.exists(&old_path) {
        return Err(OrganizerError::NotFound(old_path.display().to_string()));
    }

    let new_name = match split_number(old_name) {
        Some((number, _)) => format_numbered(number, new_base),
        None => new_base.to_string(),
    };
    if new_name == old_name {
        return Ok(new_name);
    }

    let new_path = album_dir.join(&new_name);
    if fs.exists(&new_path) {
        return Err(OrganizerError::NameCollision(new_name));
    }
    fs.rename(&old_path, &new_path)?;
    Ok(new_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizer::fsops::mem::MemFs;
    use std::path::PathBuf;

    fn album_with(projects: &[&str]) -> (MemFs, PathBuf) {
        let fs = MemFs::new();
        let album = PathBuf::from("/root/Album");
        fs.add_dir(&album);
        for p in projects {
            fs.add_dir(album.join(p));
        }
        (fs, album)
    }

    fn dir_names(fs: &MemFs, album: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs
            .list_entries(album)
            .unwrap()
            .into_iter()
            .filter(|e| e.is_dir)
            .map(|e| e.name)
            .collect();
        names.sort();
        names
    }

    #[test]
    fn extract_number_requires_exactly_two_digits() {
        assert_eq!(extract_number("05 - My Song"), Some(5));
        assert_eq!(extract_number("05-My Song"), Some(5));
        assert_eq!(extract_number("My Song"), None);
        assert_eq!(extract_number("5 - My Song"), None);
        assert_eq!(extract_number("123 - My Song"), None);
        assert_eq!(extract_number("05 My Song"), None);
    }

    #[test]
    fn strip_number_leaves_plain_names_alone() {
        assert_eq!(strip_number("07 - Utwór"), "Utwór");
        assert_eq!(strip_number("Utwór"), "Utwór");
    }

    #[test]
    fn next_number_is_max_plus_one() {
        let (fs, album) = album_with(&["01 - a", "04 - b", "luzem"]);
        assert_eq!(next_available_number(&fs, &album).unwrap(), 5);
    }

    #[test]
    fn next_number_starts_at_one() {
        let (fs, album) = album_with(&["luzem", "inny"]);
        assert_eq!(next_available_number(&fs, &album).unwrap(), 1);
    }

    #[test]
    fn assign_without_collision_is_a_single_rename() {
        let (fs, album) = album_with(&["01 - a", "nowy"]);
        let got = assign_number(&fs, &album, "nowy", 2).unwrap();
        assert_eq!(got, "02 - nowy");
        assert_eq!(dir_names(&fs, &album), vec!["01 - a", "02 - nowy"]);
    }

    #[test]
    fn assign_cascades_shift_without_losing_anyone() {
        let (fs, album) = album_with(&["01 - a", "02 - b", "03 - c", "nowy"]);
        assign_number(&fs, &album, "nowy", 2).unwrap();
        assert_eq!(
            dir_names(&fs, &album),
            vec!["01 - a", "02 - nowy", "03 - b", "04 - c"]
        );
    }

    #[test]
    fn numbers_stay_unique_through_a_sequence_of_assigns() {
        let (fs, album) = album_with(&["01 - a", "02 - b", "03 - c", "x", "y", "z"]);
        for (name, number) in [("x", 2), ("y", 1), ("z", 3)] {
            assign_number(&fs, &album, name, number).unwrap();
            let mut numbers: Vec<u32> = dir_names(&fs, &album)
                .iter()
                .filter_map(|n| extract_number(n))
                .collect();
            let len = numbers.len();
            numbers.sort_unstable();
            numbers.dedup();
            assert_eq!(numbers.len(), len, "duplicate number after assigning {name}");
        }
        assert_eq!(dir_names(&fs, &album).len(), 6);
    }

    #[test]
    fn assign_rejects_bad_preconditions() {
        let (fs, album) = album_with(&["01 - a", "nowy"]);
        assert!(matches!(
            assign_number(&fs, &album, "nowy", 0),
            Err(OrganizerError::InvalidNumber(0))
        ));
        assert!(matches!(
            assign_number(&fs, &album, "01 - a", 2),
            Err(OrganizerError::AlreadyNumbered(_))
        ));
        assert!(matches!(
            assign_number(&fs, &album, "brak", 2),
            Err(OrganizerError::NotFound(_))
        ));
    }

    #[test]
    fn renumber_swaps_two_projects() {
        let (fs, album) = album_with(&["01 - a", "02 - b"]);
        let mapping = vec![("01 - a".to_string(), 2), ("02 - b".to_string(), 1)];
        let outcome = renumber_all(&fs, &album, &mapping).unwrap();
        assert_eq!(dir_names(&fs, &album), vec!["01 - b", "02 - a"]);
        assert_eq!(outcome.renamed, 2);
        assert_eq!(outcome.stale, 0);
    }

    #[test]
    fn renumber_evicts_a_pending_occupant_through_a_temp_name() {
        // Two projects with the same base name: every target collides with
        // the other entry's current folder, so both go through eviction.
        let (fs, album) = album_with(&["01 - a", "02 - a"]);
        let mapping = vec![("01 - a".to_string(), 2), ("02 - a".to_string(), 1)];
        let outcome = renumber_all(&fs, &album, &mapping).unwrap();
        assert_eq!(dir_names(&fs, &album), vec!["01 - a", "02 - a"]);
        // evict "02 - a" to a temp, move "01 - a" onto it, land the temp on "01 - a"
        assert_eq!(outcome.renamed, 3);
    }

    #[test]
    fn renumber_skips_stale_entries_and_keeps_going() {
        let (fs, album) = album_with(&["02 - b"]);
        let mapping = vec![("zniknal".to_string(), 5), ("02 - b".to_string(), 1)];
        let outcome = renumber_all(&fs, &album, &mapping).unwrap();
        assert_eq!(outcome.stale, 1);
        assert_eq!(dir_names(&fs, &album), vec!["01 - b"]);
    }

    #[test]
    fn renumber_treats_unchanged_names_as_noops() {
        let (fs, album) = album_with(&["01 - a", "02 - b"]);
        let mapping = vec![("01 - a".to_string(), 1), ("02 - b".to_string(), 2)];
        let outcome = renumber_all(&fs, &album, &mapping).unwrap();
        assert_eq!(outcome.renamed, 0);
        assert_eq!(outcome.unchanged, 2);
    }

    #[test]
    fn renumber_rejects_collision_with_outside_folder() {
        let (fs, album) = album_with(&["01 - a", "02 - obcy"]);
        let mapping = vec![("01 - a".to_string(), 2)];
        assert!(matches!(
            renumber_all(&fs, &album, &mapping),
            Err(OrganizerError::NameCollision(name)) if name == "02 - a"
        ));
    }

    #[test]
    fn rename_keeps_the_prefix() {
        let (fs, album) = album_with(&["03 - stary", "luzem"]);
        assert_eq!(
            rename_keeping_number(&fs, &album, "03 - stary", "nowy").unwrap(),
            "03 - nowy"
        );
        assert_eq!(
            rename_keeping_number(&fs, &album, "luzem", "wolny").unwrap(),
            "wolny"
        );
        assert_eq!(dir_names(&fs, &album), vec!["03 - nowy", "wolny"]);
    }

    #[test]
    fn rename_refuses_to_overwrite() {
        let (fs, album) = album_with(&["03 - stary", "03 - nowy"]);
        // same number can't happen via assign, but a plain rename could try
        assert!(matches!(
            rename_keeping_number(&fs, &album, "03 - stary", "nowy"),
            Err(OrganizerError::NameCollision(_))
        ));
    }
}
