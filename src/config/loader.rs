//! Config document parsing: TOML or JSON into a format-neutral value.
use serde_json::Value;
use std::path::Path;

use crate::error::ConfigError;

/// On-disk syntax of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// TOML (the default).
    Toml,
    /// JSON, selected by a `.json` extension.
    Json,
}

impl Format {
    /// Pick the format from the file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use dotlink_cli::config::loader::Format;
    ///
    /// assert_eq!(Format::from_path(Path::new("install.conf.json")), Format::Json);
    /// assert_eq!(Format::from_path(Path::new("install.conf.toml")), Format::Toml);
    /// assert_eq!(Format::from_path(Path::new("install.conf")), Format::Toml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Read and parse the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::InvalidSyntax`] if it does not parse.
pub fn load_document(path: &Path) -> Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&content, Format::from_path(path), &path.display().to_string())
}

/// Parse config text in the given format.
///
/// Key order is preserved for both formats, so directives and link entries
/// are processed in the order they were written.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] if `content` does not parse;
/// `origin` names the source in the message.
pub fn parse_document(content: &str, format: Format, origin: &str) -> Result<Value, ConfigError> {
    let syntax_error = |message: String| ConfigError::InvalidSyntax {
        file: origin.to_string(),
        message,
    };
    match format {
        Format::Json => serde_json::from_str(content).map_err(|e| syntax_error(e.to_string())),
        Format::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| syntax_error(e.message().to_string()))?;
            serde_json::to_value(table).map_err(|e| syntax_error(e.to_string()))
        }
    }
}
