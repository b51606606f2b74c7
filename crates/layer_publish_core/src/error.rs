use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Zip file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read zip file {}: {source}", path.display())]
    ReadZip {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Anything the remote publish call signals, message kept verbatim.
    #[error("{0}")]
    RemoteService(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl PublishError {
    /// True for failures detected before the remote call was attempted.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::ReadZip { .. })
    }
}
