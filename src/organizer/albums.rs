use crate::error::{OrganizerError, Result};
use crate::organizer::fsops::FsGateway;
use crate::organizer::paths::{OrganizerPaths, RESERVED_ROOT_DIRS};
use crate::organizer::warnings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sidecar metadata file kept inside each album directory. A convenience
/// cache only: the directory tree stays authoritative for existence.
pub const SIDECAR_FILE: &str = ".album.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlbumCategory {
    /// Finished
    Gotowe,
    /// Still being carved
    Rzezbione,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumMeta {
    pub category: Option<AlbumCategory>,
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumView {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub project_count: usize,
    pub category: Option<AlbumCategory>,
    pub order: Option<i64>,
}

fn load_meta(fs: &dyn FsGateway, album_dir: &Path) -> AlbumMeta {
    let sidecar = album_dir.join(SIDECAR_FILE);
    if !fs.exists(&sidecar) {
        return AlbumMeta::default();
    }
    let raw = match fs.read_to_string(&sidecar) {
        Ok(raw) => raw,
        Err(_) => return AlbumMeta::default(),
    };
    match serde_json::from_str(&raw) {
        Ok(meta) => meta,
        Err(_) => {
            warnings::emit(
                "BAD_ALBUM_SIDECAR",
                "albums",
                &sidecar.display().to_string(),
                "ignored",
            );
            AlbumMeta::default()
        }
    }
}

fn save_meta(fs: &dyn FsGateway, album_dir: &Path, meta: &AlbumMeta) -> Result<()> {
    let sidecar = album_dir.join(SIDECAR_FILE);
    let data = serde_json::to_string_pretty(meta)
        .map_err(|e| OrganizerError::io(&sidecar, std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    fs.write(&sidecar, format!("{data}\n").as_bytes())
}

fn album_view(fs: &dyn FsGateway, paths: &OrganizerPaths, name: &str) -> Result<AlbumView> {
    let dir = paths.album_dir(name);
    let stat = fs.stat(&dir)?;
    let project_count = fs
        .list_entries(&dir)?
        .iter()
        .filter(|e| e.is_dir)
        .count();
    let meta = load_meta(fs, &dir);
    Ok(AlbumView {
        id: name.to_string(),
        name: name.to_string(),
        created_at: DateTime::<Utc>::from(stat.created),
        project_count,
        category: meta.category,
        order: meta.order,
    })
}

/// All albums under the root. Reserved directories are never albums;
/// "Robocze" sorts first, the rest by name.
pub fn list_albums(fs: &dyn FsGateway, paths: &OrganizerPaths) -> Result<Vec<AlbumView>> {
    if !fs.exists(&paths.root) {
        return Err(OrganizerError::NotFound(paths.root.display().to_string()));
    }
    let mut albums = Vec::new();
    for entry in fs.list_entries(&paths.root)? {
        if !entry.is_dir
            || entry.name.starts_with('.')
            || RESERVED_ROOT_DIRS.contains(&entry.name.as_str())
        {
            continue;
        }
        albums.push(album_view(fs, paths, &entry.name)?);
    }
    albums.sort_by(|a, b| {
        let a_first = a.name == "Robocze";
        let b_first = b.name == "Robocze";
        b_first.cmp(&a_first).then_with(|| a.name.cmp(&b.name))
    });
    Ok(albums)
}

pub fn create_album(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    name: &str,
) -> Result<AlbumView> {
    if RESERVED_ROOT_DIRS.contains(&name) {
        return Err(OrganizerError::NameCollision(name.to_string()));
    }
    let dir = paths.album_dir(name);
    if fs.exists(&dir) {
        return Err(OrganizerError::AlreadyExists(name.to_string()));
    }
    fs.ensure_dir(&dir)?;
    album_view(fs, paths, name)
}

pub fn rename_album(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    new_name: &str,
) -> Result<()> {
    let old_dir = paths.album_dir(album_id);
    if !fs.exists(&old_dir) {
        return Err(OrganizerError::NotFound(old_dir.display().to_string()));
    }
    if RESERVED_ROOT_DIRS.contains(&new_name) {
        return Err(OrganizerError::NameCollision(new_name.to_string()));
    }
    let new_dir = paths.album_dir(new_name);
    if fs.exists(&new_dir) {
        return Err(OrganizerError::NameCollision(new_name.to_string()));
    }
    fs.rename(&old_dir, &new_dir)
}

pub fn set_category(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    category: AlbumCategory,
) -> Result<()> {
    let dir = paths.album_dir(album_id);
    if !fs.exists(&dir) {
        return Err(OrganizerError::NotFound(dir.display().to_string()));
    }
    let mut meta = load_meta(fs, &dir);
    meta.category = Some(category);
    save_meta(fs, &dir, &meta)
}

pub fn set_order(
    fs: &dyn FsGateway,
    paths: &OrganizerPaths,
    album_id: &str,
    order: i64,
) -> Result<()> {
    let dir = paths.album_dir(album_id);
    if !fs.exists(&dir) {
        return Err(OrganizerError::NotFound(dir.display().to_string()));
    }
    let mut meta = load_meta(fs, &dir);
    meta.order = Some(order);
    save_meta(fs, &dir, &meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizer::fsops::mem::MemFs;
    use std::path::PathBuf;

    fn setup() -> (MemFs, OrganizerPaths) {
        let fs = MemFs::new();
        let root = PathBuf::from("/root/Norfeusz");
        fs.add_dir(&root);
        let paths = OrganizerPaths {
            root: root.clone(),
            sortownia_dir: root.join("Sortownia"),
            logs_dir: root.join(".norf"),
        };
        (fs, paths)
    }

    #[test]
    fn reserved_dirs_are_not_albums() {
        let (fs, paths) = setup();
        for name in ["Sortownia", "Bity", "Teksty", "Pliki", "Ep1"] {
            fs.add_dir(paths.root.join(name));
        }
        let albums = list_albums(&fs, &paths).unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ep1"]);
    }

    #[test]
    fn robocze_sorts_first() {
        let (fs, paths) = setup();
        for name in ["Album A", "Robocze", "Inny"] {
            fs.add_dir(paths.root.join(name));
        }
        let albums = list_albums(&fs, &paths).unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Robocze", "Album A", "Inny"]);
    }

    #[test]
    fn create_rejects_existing_and_reserved_names() {
        let (fs, paths) = setup();
        create_album(&fs, &paths, "Ep1").unwrap();
        assert!(matches!(
            create_album(&fs, &paths, "Ep1"),
            Err(OrganizerError::AlreadyExists(_))
        ));
        assert!(matches!(
            create_album(&fs, &paths, "Sortownia"),
            Err(OrganizerError::NameCollision(_))
        ));
    }

    #[test]
    fn category_and_order_round_trip_through_the_sidecar() {
        let (fs, paths) = setup();
        create_album(&fs, &paths, "Ep1").unwrap();
        set_category(&fs, &paths, "Ep1", AlbumCategory::Gotowe).unwrap();
        set_order(&fs, &paths, "Ep1", 3).unwrap();

        let albums = list_albums(&fs, &paths).unwrap();
        assert_eq!(albums[0].category, Some(AlbumCategory::Gotowe));
        assert_eq!(albums[0].order, Some(3));
    }

    #[test]
    fn garbage_sidecar_is_ignored() {
        let (fs, paths) = setup();
        create_album(&fs, &paths, "Ep1").unwrap();
        fs.write(&paths.album_dir("Ep1").join(SIDECAR_FILE), b"not json")
            .unwrap();
        let albums = list_albums(&fs, &paths).unwrap();
        assert_eq!(albums[0].category, None);
    }

    #[test]
    fn rename_checks_both_ends() {
        let (fs, paths) = setup();
        create_album(&fs, &paths, "Ep1").unwrap();
        create_album(&fs, &paths, "Ep2").unwrap();
        assert!(matches!(
            rename_album(&fs, &paths, "Ep1", "Ep2"),
            Err(OrganizerError::NameCollision(_))
        ));
        assert!(matches!(
            rename_album(&fs, &paths, "Brak", "Ep3"),
            Err(OrganizerError::NotFound(_))
        ));
        rename_album(&fs, &paths, "Ep1", "Ep3").unwrap();
        assert!(fs.exists(&paths.album_dir("Ep3")));
    }
}
