//! Graph provider error types.
//!
//! [`GraphError`] is shared by every provider backend. It carries a semantic
//! [`GraphErrorKind`], optional path and language context, a backend tag and
//! the underlying source error.

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphErrorKind {
    /// Snapshot does not exist.
    NotFound,
    /// Snapshot could not be parsed.
    Parse,
    /// Snapshot parsed but violates the graph layout.
    InvalidData,
    /// Underlying I/O failure.
    Io,
}

/// Error raised while loading navigation snapshots.
#[derive(Debug)]
pub struct GraphError {
    /// Semantic error category.
    pub kind: GraphErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Language of the snapshot (if applicable).
    pub language: Option<String>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    message: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GraphError {
    /// Create a new graph error.
    #[must_use]
    pub fn new(kind: GraphErrorKind) -> Self {
        Self {
            kind,
            path: None,
            language: None,
            backend: None,
            message: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach language context.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach a human readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a graph error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => GraphErrorKind::NotFound,
            _ => GraphErrorKind::Io,
        };
        Self::new(kind).with_path(path).with_source(err)
    }

    /// Create a parse error from a JSON error.
    #[must_use]
    pub fn parse(err: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        Self::new(GraphErrorKind::Parse).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message: source (language: en, path: /foo)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            GraphErrorKind::NotFound => "Snapshot not found",
            GraphErrorKind::Parse => "Snapshot parse error",
            GraphErrorKind::InvalidData => "Invalid snapshot",
            GraphErrorKind::Io => "I/O error",
        };
        write!(f, "{kind_str}")?;

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        match (&self.language, &self.path) {
            (Some(language), Some(path)) => {
                write!(f, " (language: {language}, path: {})", path.display())
            }
            (Some(language), None) => write!(f, " (language: {language})"),
            (None, Some(path)) => write!(f, " (path: {})", path.display()),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
