use std::path::PathBuf;
use thiserror::Error;

/// Typed failure modes of the core engines. Callers branch on the variant,
/// never on the message text.
#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("name collision: \"{0}\" is already taken")]
    NameCollision(String),
    #[error("project \"{0}\" already carries a number prefix")]
    AlreadyNumbered(String),
    #[error("invalid project number {0}: must be 1 or greater")]
    InvalidNumber(i64),
    #[error("no convention-named files to arrange in {0}")]
    NoConventionalFiles(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OrganizerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrganizerError>;
