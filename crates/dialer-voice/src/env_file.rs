//! The local `KEY=VALUE` configuration file.
//!
//! Reads go through `dotenvy` so quoting and comments follow the usual
//! `.env` rules. Writes rewrite the file line by line: the first line that
//! starts with `KEY=` is replaced, otherwise the pair is appended. All other
//! lines, comments included, are kept as they were.
//!
//! There is no locking. Two processes upserting at the same time can lose
//! one of the writes.

use crate::error::VoiceError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default file name, resolved against the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the file into a map. A missing file yields an empty map.
    pub fn load(&self) -> Result<HashMap<String, String>, VoiceError> {
        let iter = match dotenvy::from_path_iter(&self.path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Ok(HashMap::new())
            }
            Err(e) => return Err(VoiceError::Config(format!("{}: {}", self.path.display(), e))),
        };

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| VoiceError::Config(format!("{}: {}", self.path.display(), e)))?;
            values.insert(key, value);
        }
        Ok(values)
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>, VoiceError> {
        Ok(self.load()?.remove(key))
    }

    /// Sets `key` to `value`, replacing the first matching line or appending.
    ///
    /// Creates the file if it does not exist.
    pub fn upsert(&self, key: &str, value: &str) -> Result<(), VoiceError> {
        if key.is_empty() || key.contains('=') || key.chars().any(char::is_whitespace) {
            return Err(VoiceError::Config(format!("invalid config key: {:?}", key)));
        }
        if value.contains('\n') || value.contains('\r') {
            return Err(VoiceError::Config(format!(
                "value for {} must be a single line",
                key
            )));
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(VoiceError::EnvFile(e)),
        };

        let entry = format!("{}={}", key, value);
        let mut replaced = false;
        let mut lines: Vec<String> = contents
            .lines()
            .map(|line| {
                if !replaced && assigns(line, key) {
                    replaced = true;
                    if line.trim_start().starts_with("export ") {
                        format!("export {}", entry)
                    } else {
                        entry.clone()
                    }
                } else {
                    line.to_string()
                }
            })
            .collect();
        if !replaced {
            lines.push(entry);
        }

        let mut output = lines.join("\n");
        output.push('\n');
        fs::write(&self.path, output)?;

        info!(path = %self.path.display(), key, "updated config file");
        Ok(())
    }
}

/// True if `line` sets `key`, allowing indentation and an `export ` prefix.
fn assigns(line: &str, key: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
    line.strip_prefix(key)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

impl Default for EnvFile {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}
