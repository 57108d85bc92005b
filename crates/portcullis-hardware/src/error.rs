//! Error types for line writes.

/// Result type alias for line writes.
pub type Result<T> = std::result::Result<T, LineWriteError>;

/// A write to a control node failed.
#[derive(Debug, thiserror::Error)]
pub enum LineWriteError {
    /// The node could not be opened or written.
    #[error("Failed to write {node}: {source}")]
    Io {
        node: String,
        #[source]
        source: std::io::Error,
    },

    /// The node is known to be unavailable (missing device, detached mock).
    #[error("Line unavailable: {node}")]
    Unavailable { node: String },
}

impl LineWriteError {
    /// Create a new I/O error for the given node.
    pub fn io(node: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            node: node.into(),
            source,
        }
    }

    /// Create a new unavailable error.
    pub fn unavailable(node: impl Into<String>) -> Self {
        Self::Unavailable { node: node.into() }
    }

    /// Node the failed write targeted.
    pub fn node(&self) -> &str {
        match self {
            Self::Io { node, .. } | Self::Unavailable { node } => node,
        }
    }
}
