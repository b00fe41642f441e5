//! Config file loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// `${NAME}` placeholder.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Reads TOML config, substituting `${NAME}` from the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigError::Missing(path.to_path_buf()),
            _ => ConfigError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::load_str(&text)
    }

    /// Parse config text. `logging.directory` gets `~` expanded.
    pub fn load_str(text: &str) -> Result<Config, ConfigError> {
        let mut config: Config = toml::from_str(&Self::substitute(text)?)?;

        config.logging.directory = config
            .logging
            .directory
            .map(|dir| Self::expand_path(&dir.to_string_lossy()).into());

        Ok(config)
    }

    /// Replace every `${NAME}` in one pass; the first undefined name aborts.
    ///
    /// Whole-line `#` comments are copied through untouched so documentation
    /// may mention placeholders.
    fn substitute(text: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(text.len());

        for line in text.split_inclusive('\n') {
            if line.trim_start().starts_with('#') {
                out.push_str(line);
                continue;
            }

            let mut last = 0;
            for caps in PLACEHOLDER.captures_iter(line) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let value = std::env::var(name.as_str())
                    .map_err(|_| ConfigError::UndefinedVar(name.as_str().to_string()))?;
                out.push_str(&line[last..whole.start()]);
                out.push_str(&value);
                last = whole.end();
            }
            out.push_str(&line[last..]);
        }

        Ok(out)
    }

    /// Expand a leading `~` to the home directory.
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
