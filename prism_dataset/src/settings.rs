use std::{collections::BTreeMap, fs, path::Path};

use crate::{Error, Result};

/// Key/value settings shared by the renderer tooling.
///
/// File format:
///
/// ```text
/// [your-key]: your-value
/// # a commented line
/// ```
///
/// Lines that don't have the `[key]: value` shape (comments, blank lines,
/// anything shorter than 5 bytes) are ignored. The settings are loaded once
/// at startup and passed to whoever needs them; there is no process-global
/// dictionary.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Reads and parses a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parses settings from already loaded text.
    pub fn parse(content: &str) -> Self {
        let mut values = BTreeMap::new();
        for line in content.lines() {
            if let Some((key, value)) = parse_key_value(line) {
                values.insert(key.to_owned(), value.to_owned());
            }
        }
        Self { values }
    }

    /// Looks up the value for the given key.
    ///
    /// An absent key is a configuration error that callers are expected to
    /// surface; the binary turns it into a nonzero exit.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownSettingsKey(key.to_owned()))
    }

    /// Number of key/value pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    if line.len() < 5 || !line.starts_with('[') {
        return None;
    }
    let end_bracket = line.find("]:")?;
    Some((&line[1..end_bracket], line[end_bracket + 2..].trim()))
}
