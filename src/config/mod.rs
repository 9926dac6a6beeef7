//! Configuration loading: a file becomes an ordered list of directives.
pub mod links;
pub mod loader;

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// One `(name, data)` pair from the config file.
///
/// `data` is left undecoded; the handler that owns `name` interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Directive name, e.g. `link`.
    pub name: String,
    /// Raw directive payload.
    pub data: Value,
}

/// A loaded configuration file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path the configuration was read from.
    pub path: PathBuf,
    /// Directives in file order.
    pub directives: Vec<Directive>,
}

impl Config {
    /// Load and flatten the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or is not
    /// shaped as a list of directives.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let document = loader::load_document(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            directives: directives_from_value(document)?,
        })
    }

    /// Keep only the directives selected by `--only` / `--except`.
    ///
    /// A non-empty `only` list wins; otherwise every directive not named in
    /// `except` is kept.  Names match exactly.
    #[must_use]
    pub fn filtered(mut self, only: &[String], except: &[String]) -> Self {
        self.directives.retain(|d| {
            if only.is_empty() {
                !except.contains(&d.name)
            } else {
                only.contains(&d.name)
            }
        });
        self
    }
}

/// Flatten a parsed document into directives.
///
/// Two shapes are accepted:
///
/// - a table: each key is a directive; an array value yields one directive
///   per element (TOML `[[link]]` blocks), any other value yields one;
/// - an array of tables: every key of every table is a directive, in order.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidStructure`] for any other shape.
pub fn directives_from_value(document: Value) -> Result<Vec<Directive>, ConfigError> {
    match document {
        Value::Object(table) => Ok(table
            .into_iter()
            .flat_map(|(name, data)| match data {
                Value::Array(items) => items
                    .into_iter()
                    .map(|data| Directive {
                        name: name.clone(),
                        data,
                    })
                    .collect::<Vec<_>>(),
                data => vec![Directive { name, data }],
            })
            .collect()),
        Value::Array(items) => {
            let mut directives = Vec::new();
            for (index, item) in items.into_iter().enumerate() {
                let Value::Object(table) = item else {
                    return Err(ConfigError::InvalidStructure(format!(
                        "item {} of the directive list is not a table",
                        index + 1
                    )));
                };
                directives.extend(
                    table
                        .into_iter()
                        .map(|(name, data)| Directive { name, data }),
                );
            }
            Ok(directives)
        }
        _ => Err(ConfigError::InvalidStructure(
            "expected a table or a list of directives".to_string(),
        )),
    }
}
