use std::io;
use std::path::PathBuf;

/// Error produced when a filter configuration cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum FiltersError {
    /// The configuration is not a mapping of collection names to
    /// collection descriptions, or declares a name twice.
    #[error("failed to decode filters: {0}")]
    Decode(#[from] serde_yaml::Error),
    /// The configuration file could not be read.
    #[error("failed to read filters from '{}': {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl FiltersError {
    /// Returns the file involved in the failure, when there is one.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Decode(_) => None,
            Self::Io { path, .. } => Some(path),
        }
    }
}
