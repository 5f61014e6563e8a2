use anyhow::Result;
use std::path::Path;

use crate::commands::{CommandReport, audit_ok};
use crate::organizer::config::load_config;
use crate::organizer::files;
use crate::organizer::fsops::{FsGateway, RealFs};
use crate::organizer::naming::{self, FolderType, Subtype};
use crate::organizer::paths::resolve_paths;

#[derive(Debug, Clone)]
pub struct FileListOptions {
    pub album: Option<String>,
    pub project: Option<String>,
    pub folder: Option<FolderType>,
}

#[derive(Debug, Clone)]
pub struct FileMoveOptions {
    pub source: String,
    pub album: String,
    pub project: String,
    pub folder: FolderType,
    pub subtype: Option<Subtype>,
}

/// Narrowest scope wins: folder, then project, then album, then the whole
/// library.
pub fn list(opts: &FileListOptions) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("file-list");

    let infos = match (&opts.album, &opts.project, opts.folder) {
        (Some(album), Some(project), Some(folder)) => {
            files::list_folder_files(&fs, &paths, album, project, folder)?
        }
        (Some(album), Some(project), None) => {
            files::list_project_files(&fs, &paths, album, project)?
        }
        (Some(album), None, None) => files::list_album_files(&fs, &paths, album)?,
        (None, None, None) => files::list_all_files(&fs, &paths)?,
        _ => {
            report.issue("--project requires --album, --folder requires --project");
            return Ok(report);
        }
    };

    report.detail(format!("files={}", infos.len()));
    for info in &infos {
        report.detail(info.name.clone());
    }
    report.data(infos);
    Ok(report)
}

/// Move a file into a project subfolder under the next convention name.
pub fn move_file(opts: &FileMoveOptions) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let fs = RealFs;
    let mut report = CommandReport::new("file-move");

    let (new_path, new_name) = files::move_into_folder(
        &fs,
        &cfg.naming,
        &paths,
        Path::new(&opts.source),
        &opts.album,
        &opts.project,
        opts.folder,
        opts.subtype,
    )?;
    report.detail(format!("moved to {}", new_path.display()));
    report.data(new_name.clone());
    audit_ok(
        &paths,
        "file-move",
        &format!("{} -> {}", opts.source, new_path.display()),
    );
    Ok(report)
}

pub fn rename(path: &str, new_name: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("file-rename");

    let new_path = files::rename_file(&fs, Path::new(path), new_name)?;
    report.detail(format!("renamed to {}", new_path.display()));
    audit_ok(&paths, "file-rename", &format!("{path} -> {new_name}"));
    Ok(report)
}

pub fn delete(path: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("file-delete");

    files::delete_file(&fs, Path::new(path))?;
    report.detail(format!("deleted {path}"));
    audit_ok(&paths, "file-delete", path);
    Ok(report)
}

/// Show the name a file would get, without moving anything.
pub fn preview_name(
    album: &str,
    project: &str,
    folder: FolderType,
    subtype: Option<Subtype>,
    extension: &str,
) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let fs = RealFs;
    let mut report = CommandReport::new("preview-name");

    let extension = if extension.is_empty() || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    };
    let target_dir = paths.folder_dir(album, project, folder);
    let existing: Vec<String> = if fs.exists(&target_dir) {
        fs.list_entries(&target_dir)?
            .into_iter()
            .filter(|e| !e.is_dir && e.name.ends_with(&extension))
            .map(|e| e.name)
            .collect()
    } else {
        Vec::new()
    };

    let semantic_type = folder.semantic_type(subtype, cfg.naming.distinct_daw_types);
    let name = naming::generate_file_name(
        project,
        &semantic_type,
        &extension,
        &existing,
        cfg.naming.separator,
    );
    report.detail(name.clone());
    report.data(name);
    Ok(report)
}
