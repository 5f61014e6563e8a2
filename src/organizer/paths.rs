use crate::organizer::naming::FolderType;
use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Staging folder for unsorted incoming files.
pub const STAGING_DIR: &str = "Sortownia";

/// Root-level directories that are never albums: the staging folder plus the
/// shared loose-file folders.
pub const RESERVED_ROOT_DIRS: [&str; 4] = ["Sortownia", "Bity", "Teksty", "Pliki"];

/// Shared folders a staged file may be moved into directly.
pub const MAIN_FOLDERS: [&str; 3] = ["Bity", "Teksty", "Pliki"];

/// Resolved filesystem layout. Built once per invocation and passed down
/// explicitly; nothing in the core reads the environment after this.
#[derive(Debug, Clone)]
pub struct OrganizerPaths {
    pub root: PathBuf,
    pub sortownia_dir: PathBuf,
    pub logs_dir: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<OrganizerPaths> {
    let home = required_home_dir()?;
    let root = env_or_default_path("NORF_ROOT", home.join("Norfeusz"));
    let sortownia_dir = root.join(STAGING_DIR);
    let logs_dir = env_or_default_path("NORF_LOGS_DIR", root.join(".norf"));

    Ok(OrganizerPaths {
        root,
        sortownia_dir,
        logs_dir,
    })
}

impl OrganizerPaths {
    pub fn album_dir(&self, album_id: &str) -> PathBuf {
        self.root.join(album_id)
    }

    pub fn project_dir(&self, album_id: &str, project_name: &str) -> PathBuf {
        self.album_dir(album_id).join(project_name)
    }

    pub fn folder_dir(&self, album_id: &str, project_name: &str, folder: FolderType) -> PathBuf {
        self.project_dir(album_id, project_name).join(folder.dir_name())
    }

    pub fn main_folder_dir(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}
