use std::{path::PathBuf, process::ExitStatus, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

/// An enum for describing and handling various errors encountered while
/// building `guml` options, extracting the history, or writing and rendering
/// the graph.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot get current directory")]
    CurrentDir,

    #[error("malformed log line, expected `id|parents|message`: {0:?}")]
    MalformedLine(String),

    #[error("repository not found: {}", .0.display())]
    RepoNotFound(PathBuf),

    #[error("git log failed: {0}")]
    GitLog(String),

    #[error("renderer not found: {}", .0.display())]
    RendererNotFound(PathBuf),

    #[error("renderer exited with {0}")]
    Renderer(ExitStatus),

    #[error("fatal I/O error with output file")]
    Io(#[from] std::io::Error),
}
