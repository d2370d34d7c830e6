//! Version store backed by a TOML manifest.
//!
//! Reading goes through the `toml` parser so that a missing field, a
//! non-string field and a malformed document are told apart. Writing never
//! re-serializes the document: the quoted value on the single line that
//! holds the field is replaced in place and every other byte is kept.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::domain::Version;
use crate::error::{Error, Result, StoreError};

pub const DEFAULT_MANIFEST: &str = "Cargo.toml";
pub const DEFAULT_VERSION_KEY: &str = "package.version";

/// Persisted version record of a project
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
    key: Vec<String>,
}

impl VersionStore {
    /// Create a store for `manifest` (relative to `project_root`) and a dotted key path
    pub fn new(project_root: &Path, manifest: impl AsRef<Path>, key: &str) -> Result<Self> {
        let segments: Vec<String> = key.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::config(format!("invalid version key '{}'", key)));
        }

        Ok(VersionStore {
            path: project_root.join(manifest),
            key: segments,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> String {
        self.key.join(".")
    }

    /// Read the current version from the manifest
    pub fn read(&self) -> std::result::Result<Version, StoreError> {
        let text = self.load()?;
        let raw = self.lookup(&text)?;
        Version::parse(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the version field's value, leaving the rest of the file untouched
    pub fn write(&self, version: &Version) -> std::result::Result<(), StoreError> {
        let text = self.load()?;
        // Fails early on a manifest we could not have read back
        self.lookup(&text)?;

        let new_value = version.to_string();
        let updated = self.replace_value(&text, &new_value).ok_or_else(|| StoreError::Malformed {
            path: self.path.clone(),
            reason: format!(
                "'{}' is not a single-line quoted string that can be rewritten in place",
                self.key()
            ),
        })?;

        if self.lookup(&updated)? != new_value {
            return Err(StoreError::Malformed {
                path: self.path.clone(),
                reason: format!("rewrite of '{}' did not take effect", self.key()),
            });
        }

        fs::write(&self.path, updated).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), version = %new_value, "wrote version");
        Ok(())
    }

    fn load(&self) -> std::result::Result<String, StoreError> {
        fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                path: self.path.clone(),
            },
            _ => StoreError::Io {
                path: self.path.clone(),
                source,
            },
        })
    }

    fn lookup(&self, text: &str) -> std::result::Result<String, StoreError> {
        let table: toml::Table = text.parse().map_err(|e: toml::de::Error| StoreError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let missing = || StoreError::MissingField {
            path: self.path.clone(),
            key: self.key(),
        };

        let (last, parents) = self.key.split_last().ok_or_else(missing)?;
        let mut current = &table;
        for segment in parents {
            current = current
                .get(segment)
                .and_then(toml::Value::as_table)
                .ok_or_else(missing)?;
        }

        match current.get(last) {
            Some(toml::Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(StoreError::Malformed {
                path: self.path.clone(),
                reason: format!("'{}' is a {}, expected a string", self.key(), other.type_str()),
            }),
            None => Err(missing()),
        }
    }

    /// Rewrite the quoted value of the first line assigning the key.
    ///
    /// The key may be split between a `[table]` header and a dotted key on
    /// the assignment line, e.g. `[package]` + `version` or the root table
    /// + `package.version`.
    fn replace_value(&self, text: &str, new_value: &str) -> Option<String> {
        let header = Regex::new(r#"^\s*\[\s*([^\[\]]+?)\s*\]\s*(?:#.*)?$"#).ok()?;
        let array_header = Regex::new(r#"^\s*\[\["#).ok()?;

        let candidates: Vec<(String, Regex)> = (0..self.key.len())
            .filter_map(|split| {
                let table = self.key[..split].join(".");
                let key_pattern = self.key[split..]
                    .iter()
                    .map(|s| format!(r#"["']?{}["']?"#, regex::escape(s)))
                    .collect::<Vec<_>>()
                    .join(r"\s*\.\s*");
                let assignment = format!(
                    r#"^(\s*{}\s*=\s*)(?:"([^"\\\r\n]*)"|'([^'\r\n]*)')"#,
                    key_pattern
                );
                Regex::new(&assignment).ok().map(|re| (table, re))
            })
            .collect();

        // None while inside an array of tables, which never holds the field
        let mut current_table = Some(String::new());
        // Closing delimiter of the multi-line string being skipped
        let mut open_string: Option<&str> = None;
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            let content = line.trim_end_matches(['\n', '\r']);

            if let Some(delimiter) = open_string {
                if content.contains(delimiter) {
                    open_string = None;
                }
            } else if let Some(delimiter) = multiline_string_opened(content) {
                open_string = Some(delimiter);
            } else if array_header.is_match(content) {
                current_table = None;
            } else if let Some(caps) = header.captures(content) {
                current_table = Some(normalize_table_name(&caps[1]));
            } else if let Some(table) = &current_table {
                for (wanted, assignment) in &candidates {
                    if wanted != table {
                        continue;
                    }
                    if let Some(caps) = assignment.captures(content) {
                        let value = caps.get(2).or_else(|| caps.get(3))?;
                        let start = offset + value.start();
                        let end = offset + value.end();

                        let mut updated = String::with_capacity(text.len() + new_value.len());
                        updated.push_str(&text[..start]);
                        updated.push_str(new_value);
                        updated.push_str(&text[end..]);
                        return Some(updated);
                    }
                }
            }

            offset += line.len();
        }

        None
    }
}

/// Delimiter of a multi-line string that starts on this line and stays open
fn multiline_string_opened(line: &str) -> Option<&'static str> {
    let (start, delimiter) = ["\"\"\"", "'''"]
        .into_iter()
        .filter_map(|d| line.find(d).map(|i| (i, d)))
        .min_by_key(|(i, _)| *i)?;
    if line[..start].contains('#') {
        return None;
    }
    if line[start + delimiter.len()..].contains(delimiter) {
        None
    } else {
        Some(delimiter)
    }
}

fn normalize_table_name(raw: &str) -> String {
    raw.split('.')
        .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\''))
        .collect::<Vec<_>>()
        .join(".")
}
