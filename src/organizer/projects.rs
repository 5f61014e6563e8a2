use crate::error::{OrganizerError, Result};
use crate::organizer::fsops::FsGateway;
use crate::organizer::naming::ALL_FOLDERS;
use crate::organizer::numbering;
use crate::organizer::paths::OrganizerPaths;
use crate::organizer::plan;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub album_id: String,
    pub number: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How a new project gets its "NN - " prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// Next free number in the album.
    Auto,
    /// A specific number; siblings at or above it are shifted up.
    Manual(i64),
    /// No prefix at all.
    None,
}

fn project_view(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    name: &str,
) -> Result<ProjectView> {
    let stat = fs.stat(&paths.project_dir(album_id, name))?;
    Ok(ProjectView {
        name: name.to_string(),
        album_id: album_id.to_string(),
        number: numbering::extract_number(name),
        created_at: DateTime::<Utc>::from(stat.created),
        updated_at: DateTime::<Utc>::from(stat.modified),
    })
}

pub fn list_projects(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
) -> Result<Vec<ProjectView>> {
    let album_dir = paths.album_dir(album_id);
    if !fs.exists(&album_dir) {
        return Err(OrganizerError::NotFound(album_dir.display().to_string()));
    }
    let mut projects = Vec::new();
    for entry in fs.list_entries(&album_dir)? {
        if entry.is_dir {
            projects.push(project_view(fs, paths, album_id, &entry.name)?);
        }
    }
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

/// Create a project with the fixed eight-subfolder structure.
pub fn create_project(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    name: &str,
    numbering_mode: Numbering,
) -> Result<ProjectView> {
    let album_dir = paths.album_dir(album_id);
    if !fs.exists(&album_dir) {
        return Err(OrganizerError::NotFound(album_dir.display().to_string()));
    }

    let final_name = match numbering_mode {
        Numbering::None => name.to_string(),
        Numbering::Auto => {
            let number = numbering::next_available_number(fs, &album_dir)?;
            numbering::format_numbered(number, name)
        }
        Numbering::Manual(requested) => {
            if requested < 1 {
                return Err(OrganizerError::InvalidNumber(requested));
            }
            let number = requested as u32;
            let siblings: Vec<String> = fs
                .list_entries(&album_dir)?
                .into_iter()
                .filter(|e| e.is_dir)
                .map(|e| e.name)
                .collect();
            if siblings
                .iter()
                .any(|s| numbering::extract_number(s) == Some(number))
            {
                let steps = numbering::shift_plan(&siblings, number);
                plan::execute(fs, &album_dir, &steps)?;
            }
            numbering::format_numbered(number, name)
        }
    };

    let project_dir = album_dir.join(&final_name);
    if fs.exists(&project_dir) {
        return Err(OrganizerError::AlreadyExists(final_name));
    }

    for folder in ALL_FOLDERS {
        fs.ensure_dir(&project_dir.join(folder.dir_name()))?;
    }

    project_view(fs, paths, album_id, &final_name)
}

/// Delete a project outright. Files that should survive are evacuated with
/// [`evacuate_to_staging`] first.
pub fn delete_project(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    project_name: &str,
) -> Result<()> {
    let project_dir = paths.project_dir(album_id, project_name);
    if !fs.exists(&project_dir) {
        return Err(OrganizerError::NotFound(project_dir.display().to_string()));
    }
    fs.remove_dir_all(&project_dir)
}

/// Move every file of the project's subfolders into the staging area,
/// suffixing a timestamp when a name is already taken there. Returns how
/// many files were moved.
pub fn evacuate_to_staging(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    project_name: &str,
    stamp: u64,
) -> Result<usize> {
    let project_dir = paths.project_dir(album_id, project_name);
    if !fs.exists(&project_dir) {
        return Err(OrganizerError::NotFound(project_dir.display().to_string()));
    }
    fs.ensure_dir(&paths.sortownia_dir)?;

    let mut moved = 0usize;
    for folder in ALL_FOLDERS {
        let folder_dir = project_dir.join(folder.dir_name());
        if !fs.exists(&folder_dir) {
            continue;
        }
        for entry in fs.list_entries(&folder_dir)? {
            if entry.is_dir {
                continue;
            }
            let mut target = paths.sortownia_dir.join(&entry.name);
            if fs.exists(&target) {
                target = paths.sortownia_dir.join(stamped_name(&entry.name, stamp));
            }
            fs.rename(&folder_dir.join(&entry.name), &target)?;
            moved += 1;
        }
    }
    Ok(moved)
}

/// `name.ext` -> `name_{stamp}.ext`, used whenever a file lands in staging
/// under an already-taken name.
pub fn stamped_name(name: &str, stamp: u64) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => format!("{}_{stamp}{}", &name[..idx], &name[idx..]),
        _ => format!("{name}_{stamp}"),
    }
}
