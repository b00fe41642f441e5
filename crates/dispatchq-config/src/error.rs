//! Config loading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `${NAME}` referenced a variable absent from the environment.
    #[error("undefined variable ${{{0}}} in config")]
    UndefinedVar(String),

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}
