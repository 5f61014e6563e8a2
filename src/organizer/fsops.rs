use crate::error::{OrganizerError, Result};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Metadata for one directory entry, as returned by [`FsGateway::list_entries`].
#[derive(Debug, Clone)]
pub struct EntryMeta {
    pub name: String,
    pub is_dir: bool,
    pub len: u64,
    pub created: SystemTime,
    pub modified: SystemTime,
}

/// The filesystem capability the engines are parameterized by. Everything the
/// core touches on disk goes through this seam, so the numbering and arrange
/// plans can be exercised against [`MemFs`] without a real tree.
pub trait FsGateway {
    fn list_entries(&self, dir: &Path) -> Result<Vec<EntryMeta>>;
    fn stat(&self, path: &Path) -> Result<EntryMeta>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn ensure_dir(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// Production gateway over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

fn meta_of(name: String, meta: &fs::Metadata) -> EntryMeta {
    let modified = meta.modified().unwrap_or(UNIX_EPOCH);
    // Birth time is unavailable on some filesystems; fall back to mtime.
    let created = meta.created().unwrap_or(modified);
    EntryMeta {
        name,
        is_dir: meta.is_dir(),
        len: meta.len(),
        created,
        modified,
    }
}

impl FsGateway for RealFs {
    fn list_entries(&self, dir: &Path) -> Result<Vec<EntryMeta>> {
        let read_dir = fs::read_dir(dir).map_err(|e| OrganizerError::io(dir, e))?;
        let mut out = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| OrganizerError::io(dir, e))?;
            let meta = entry
                .metadata()
                .map_err(|e| OrganizerError::io(entry.path(), e))?;
            out.push(meta_of(entry.file_name().to_string_lossy().into_owned(), &meta));
        }
        Ok(out)
    }

    fn stat(&self, path: &Path) -> Result<EntryMeta> {
        let meta = fs::metadata(path).map_err(|e| OrganizerError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(meta_of(name, &meta))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).map_err(|e| OrganizerError::io(from, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| OrganizerError::io(path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| OrganizerError::io(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| OrganizerError::io(path, e))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| OrganizerError::io(path, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).map_err(|e| OrganizerError::io(path, e))
    }
}
