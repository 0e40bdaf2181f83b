use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read or write preferences: {0}")]
    Io(#[from] io::Error),

    #[error("malformed preferences file: {0}")]
    Serde(String),

    #[error("no configuration directory available; set {env} to choose one")]
    NoHome { env: &'static str },

    #[error("preferences path `{}` is not a file", .0.display())]
    NotAFile(PathBuf),
}
