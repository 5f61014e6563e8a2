use crate::error::{OrganizerError, Result};
use crate::organizer::config::NamingConfig;
use crate::organizer::fsops::{EntryMeta, FsGateway};
use crate::organizer::naming::{self, FolderType, Subtype, ALL_FOLDERS};
use crate::organizer::paths::{OrganizerPaths, RESERVED_ROOT_DIRS};
use crate::organizer::warnings;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub extension: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub is_directory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

/// Extension with its leading dot, lowercased; empty for dotless names.
fn display_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Extension as written in the name, case preserved, for filtering and
/// generation (the counter scan matches the extension verbatim).
pub fn raw_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_string(),
        _ => String::new(),
    }
}

fn file_info(entry: &EntryMeta, dir: &Path) -> FileInfo {
    FileInfo {
        name: entry.name.clone(),
        path: dir.join(&entry.name).display().to_string(),
        size: if entry.is_dir { 0 } else { entry.len },
        extension: if entry.is_dir {
            String::new()
        } else {
            display_extension(&entry.name)
        },
        created_at: DateTime::<Utc>::from(entry.created),
        modified_at: DateTime::<Utc>::from(entry.modified),
        is_directory: entry.is_dir,
        folder: None,
        project: None,
        album: None,
    }
}

/// Raw listing of one directory as FileInfo, unsorted.
pub fn list_dir_infos(fs: &dyn FsGateway, dir: &Path) -> Result<Vec<FileInfo>> {
    Ok(fs
        .list_entries(dir)?
        .iter()
        .map(|e| file_info(e, dir))
        .collect())
}

/// Files of one project subfolder, name order. A missing folder is an empty
/// listing, not an error.
pub fn list_folder_files(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    project_name: &str,
    folder: FolderType,
) -> Result<Vec<FileInfo>> {
    let dir = paths.folder_dir(album_id, project_name, folder);
    if !fs.exists(&dir) {
        return Ok(Vec::new());
    }
    let mut files: Vec<FileInfo> = fs
        .list_entries(&dir)?
        .iter()
        .map(|e| file_info(e, &dir))
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Every file of every subfolder of one project, newest-modified first.
pub fn list_project_files(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    project_name: &str,
) -> Result<Vec<FileInfo>> {
    let project_dir = paths.project_dir(album_id, project_name);
    if !fs.exists(&project_dir) {
        return Err(OrganizerError::NotFound(project_dir.display().to_string()));
    }

    let mut all = Vec::new();
    for folder in ALL_FOLDERS {
        let dir = project_dir.join(folder.dir_name());
        if !fs.exists(&dir) {
            continue;
        }
        for entry in fs.list_entries(&dir)? {
            if entry.is_dir {
                continue;
            }
            let mut info = file_info(&entry, &dir);
            info.folder = Some(folder.dir_name().to_string());
            all.push(info);
        }
    }
    all.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    Ok(all)
}

pub fn list_album_files(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
) -> Result<Vec<FileInfo>> {
    let album_dir = paths.album_dir(album_id);
    if !fs.exists(&album_dir) {
        return Err(OrganizerError::NotFound(album_dir.display().to_string()));
    }

    let mut all = Vec::new();
    for entry in fs.list_entries(&album_dir)? {
        if !entry.is_dir {
            continue;
        }
        let mut project_files = list_project_files(fs, paths, album_id, &entry.name)?;
        for info in &mut project_files {
            info.project = Some(entry.name.clone());
        }
        all.append(&mut project_files);
    }
    all.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    Ok(all)
}

/// Every file of every album. An album that fails to list is warned about
/// and skipped rather than sinking the whole inventory.
pub fn list_all_files(fs: &dyn FsGateway, paths: &OrganizerPaths) -> Result<Vec<FileInfo>> {
    if !fs.exists(&paths.root) {
        return Err(OrganizerError::NotFound(paths.root.display().to_string()));
    }

    let mut all = Vec::new();
    for entry in fs.list_entries(&paths.root)? {
        if !entry.is_dir
            || entry.name.starts_with('.')
            || RESERVED_ROOT_DIRS.contains(&entry.name.as_str())
        {
            continue;
        }
        match list_album_files(fs, paths, &entry.name) {
            Ok(mut album_files) => {
                for info in &mut album_files {
                    info.album = Some(entry.name.clone());
                }
                all.append(&mut album_files);
            }
            Err(err) => {
                warnings::emit("ALBUM_LISTING_FAILED", "inventory", &entry.name, &err.to_string());
            }
        }
    }
    all.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    Ok(all)
}

/// Move a file into a project subfolder under a freshly generated
/// convention name. Returns the new path and name.
pub fn move_into_folder(
    fs: &dyn FsGateway,
    naming_cfg: &NamingConfig,
    paths: &OrganizerPaths,
    source: &Path,
    album_id: &str,
    project_name: &str,
    folder: FolderType,
    subtype: Option<Subtype>,
) -> Result<(PathBuf, String)> {
    if !fs.exists(source) {
        return Err(OrganizerError::NotFound(source.display().to_string()));
    }

    let target_dir = paths.folder_dir(album_id, project_name, folder);
    fs.ensure_dir(&target_dir)?;

    let extension = raw_extension(&source.file_name().map_or_else(
        String::new,
        |n| n.to_string_lossy().into_owned(),
    ));
    let existing: Vec<String> = fs
        .list_entries(&target_dir)?
        .into_iter()
        .filter(|e| !e.is_dir && e.name.ends_with(&extension))
        .map(|e| e.name)
        .collect();

    let semantic_type = folder.semantic_type(subtype, naming_cfg.distinct_daw_types);
    let new_name = naming::generate_file_name(
        project_name,
        &semantic_type,
        &extension,
        &existing,
        naming_cfg.separator,
    );
    let new_path = target_dir.join(&new_name);
    if fs.exists(&new_path) {
        return Err(OrganizerError::NameCollision(new_name));
    }
    fs.rename(source, &new_path)?;
    Ok((new_path, new_name))
}

pub fn rename_file(fs: &dyn FsGateway, path: &Path, new_name: &str) -> Result<PathBuf> {
    if !fs.exists(path) {
        return Err(OrganizerError::NotFound(path.display().to_string()));
    }
    let Some(dir) = path.parent() else {
        return Err(OrganizerError::NotFound(path.display().to_string()));
    };
    let new_path = dir.join(new_name);
    if fs.exists(&new_path) {
        return Err(OrganizerError::NameCollision(new_name.to_string()));
    }
    fs.rename(path, &new_path)?;
    Ok(new_path)
}

pub fn delete_file(fs: &dyn FsGateway, path: &Path) -> Result<()> {
    if !fs.exists(path) {
        return Err(OrganizerError::NotFound(path.display().to_string()));
    }
    fs.remove_file(path)
}
