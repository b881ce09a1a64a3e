use std::path::PathBuf;

/// A document selected for registration or verification.
///
/// Sources either carry their bytes already (e.g. handed over by a caller
/// that read them elsewhere) or name a path that the digest engine reads
/// fully into memory when hashing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileSource {
    /// Bytes already in memory, with a display name for messages.
    Memory { name: String, bytes: Vec<u8> },
    /// A file on disk, read at hashing time.
    Path(PathBuf),
}

impl FileSource {
    /// In-memory source with a display name.
    pub fn memory(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Memory {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Display name for log and error messages.
    pub fn name(&self) -> String {
        match self {
            Self::Memory { name, .. } => name.clone(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}
