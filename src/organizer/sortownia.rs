//! Staging area ("Sortownia"): unsorted incoming files live here until they
//! are sorted into a project subfolder or one of the shared root folders.

use crate::error::{OrganizerError, Result};
use crate::organizer::config::NamingConfig;
use crate::organizer::files::{self, FileInfo};
use crate::organizer::fsops::FsGateway;
use crate::organizer::naming::{FolderType, Subtype};
use crate::organizer::paths::{MAIN_FOLDERS, OrganizerPaths};
use crate::organizer::projects::stamped_name;
use std::path::{Component, Path, PathBuf};

/// Sub-subfolder of "Demo bit" that holds raw stem tracks under their
/// original names.
pub const SCIEZKI_DIR: &str = "Ścieżki";

/// Staging entries, directories first, then names.
pub fn list_staging(fs: &dyn FsGateway, paths: &OrganizerPaths) -> Result<Vec<FileInfo>> {
    if !fs.exists(&paths.sortownia_dir) {
        fs.ensure_dir(&paths.sortownia_dir)?;
        return Ok(Vec::new());
    }
    let mut entries = files::list_dir_infos(fs, &paths.sortownia_dir)?;
    entries.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(entries)
}

/// Bring a file from outside the tree into staging, keeping its name and
/// stamping a suffix on collision. Returns the path it landed at.
pub fn import_file(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    source: &Path,
    stamp: u64,
) -> Result<PathBuf> {
    if !fs.exists(source) {
        return Err(OrganizerError::NotFound(source.display().to_string()));
    }
    fs.ensure_dir(&paths.sortownia_dir)?;

    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| OrganizerError::NotFound(source.display().to_string()))?;

    let mut target = paths.sortownia_dir.join(&name);
    if fs.exists(&target) {
        target = paths.sortownia_dir.join(stamped_name(&name, stamp));
    }
    fs.rename(source, &target)?;
    Ok(target)
}

/// How a staged file is named when sorted into a project subfolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortName {
    /// Next convention name for the destination folder.
    Generated,
    /// Caller-supplied name; the source extension is appended when missing.
    Custom(String),
    /// Original name kept verbatim, placed in "Demo bit/Ścieżki".
    Sciezki,
}

/// Move a staged file into a project subfolder. Returns the new path and
/// final name.
pub fn sort_into_project(
    fs: &dyn FsGateway,
    naming_cfg: &NamingConfig,
    paths: &OrganizerPaths,
    file_name: &str,
    album_id: &str,
    project_name: &str,
    folder: FolderType,
    subtype: Option<Subtype>,
    sort_name: SortName,
) -> Result<(PathBuf, String)> {
    let source = paths.sortownia_dir.join(file_name);
    if !fs.exists(&source) {
        return Err(OrganizerError::NotFound(source.display().to_string()));
    }

    match sort_name {
        SortName::Generated => files::move_into_folder(
            fs, naming_cfg, paths, &source, album_id, project_name, folder, subtype,
        ),
        SortName::Custom(custom) => {
            let extension = files::raw_extension(file_name);
            let final_name = if custom.ends_with(&extension) || extension.is_empty() {
                custom
            } else {
                format!("{custom}{extension}")
            };
            let target_dir = paths.folder_dir(album_id, project_name, folder);
            fs.ensure_dir(&target_dir)?;
            let target = target_dir.join(&final_name);
            if fs.exists(&target) {
                return Err(OrganizerError::NameCollision(final_name));
            }
            fs.rename(&source, &target)?;
            Ok((target, final_name))
        }
        SortName::Sciezki => {
            if folder != FolderType::DemoBit {
                return Err(OrganizerError::NotFound(format!(
                    "{SCIEZKI_DIR} only exists under {}",
                    FolderType::DemoBit.dir_name()
                )));
            }
            let target_dir = paths
                .folder_dir(album_id, project_name, folder)
                .join(SCIEZKI_DIR);
            fs.ensure_dir(&target_dir)?;
            let target = target_dir.join(file_name);
            if fs.exists(&target) {
                return Err(OrganizerError::NameCollision(file_name.to_string()));
            }
            fs.rename(&source, &target)?;
            Ok((target, file_name.to_string()))
        }
    }
}

/// Move a staged file into one of the shared root folders (subpaths
/// allowed), keeping its name.
pub fn sort_into_main_folder(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    file_name: &str,
    target_folder: &Path,
) -> Result<PathBuf> {
    let source = paths.sortownia_dir.join(file_name);
    if !fs.exists(&source) {
        return Err(OrganizerError::NotFound(source.display().to_string()));
    }

    let first = target_folder
        .components()
        .find_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .unwrap_or_default();
    if !MAIN_FOLDERS.contains(&first.as_str()) {
        return Err(OrganizerError::NotFound(format!(
            "\"{}\" is not a shared root folder",
            target_folder.display()
        )));
    }

    let target = paths.main_folder_dir(target_folder).join(file_name);
    if let Some(parent) = target.parent() {
        fs.ensure_dir(parent)?;
    }
    if fs.exists(&target) {
        return Err(OrganizerError::NameCollision(file_name.to_string()));
    }
    fs.rename(&source, &target)?;
    Ok(target)
}

pub fn delete_from_staging(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    file_name: &str,
) -> Result<()> {
    let path = paths.sortownia_dir.join(file_name);
    if !fs.exists(&path) {
        return Err(OrganizerError::NotFound(path.display().to_string()));
    }
    fs.remove_file(&path)
}
