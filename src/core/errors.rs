use std::path::PathBuf;

/// All fatal errors for buildenv.
///
/// Every variant maps to a documented process exit code; callers in build
/// pipelines branch on those codes, so they are part of the contract.
#[derive(Debug, thiserror::Error)]
pub enum BuildenvError {
    #[error("environment is required")]
    EnvironmentMissing,

    #[error("unable to read variable file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to decode variables yaml: {detail}")]
    Yaml { detail: String },

    #[error("Vault - Client Error: {reason}")]
    VaultClient { reason: String },

    #[error("Vault - Read Error at {path}: {reason}")]
    VaultRead { path: String, reason: String },

    #[error("Vault - No secret at path: {path}")]
    VaultMissing { path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BuildenvError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EnvironmentMissing => 2,
            Self::FileRead { .. } => 4,
            Self::Yaml { .. } => 5,
            Self::VaultClient { .. } | Self::VaultRead { .. } | Self::VaultMissing { .. } => 6,
            Self::Io(_) => 1,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BuildenvError>;
