//! Link directive data: destination → source mapping.
use serde::Deserialize;
use serde_json::Value;

use crate::error::DirectiveError;

/// Where a link should point, as written in the config.
///
/// Either a plain path string, or an extended record that can also request
/// forced replacement of whatever occupies the destination.
///
/// # Examples
///
/// ```
/// use dotlink_cli::config::links::LinkSource;
///
/// let plain: LinkSource = serde_json::from_str(r#""vimrc""#).unwrap();
/// assert_eq!(plain, LinkSource::Simple("vimrc".into()));
/// assert!(!plain.force());
///
/// let extended: LinkSource =
///     serde_json::from_str(r#"{"path": "config/nvim", "force": true}"#).unwrap();
/// assert_eq!(extended.path(), "config/nvim");
/// assert!(extended.force());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LinkSource {
    /// Plain string: `"vimrc"`.
    Simple(String),
    /// Structured: `{ path = "vimrc", force = true }`.
    Extended {
        /// Source path, relative to the base directory unless absolute.
        path: String,
        /// Remove a non-link occupant at the destination first.
        #[serde(default)]
        force: bool,
    },
}

impl LinkSource {
    /// Source path as written.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Simple(path) | Self::Extended { path, .. } => path,
        }
    }

    /// Whether forced replacement was requested.
    #[must_use]
    pub const fn force(&self) -> bool {
        match self {
            Self::Simple(_) => false,
            Self::Extended { force, .. } => *force,
        }
    }
}

/// One entry of a link directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// Where the link must live; may start with `~`.
    pub destination: String,
    /// What it must point to.
    pub source: LinkSource,
}

/// Decode the data of a `link` directive into ordered [`LinkSpec`]s.
///
/// The data must be a table whose keys are destinations and whose values
/// are [`LinkSource`]s.  Entry order follows the config file.
///
/// # Errors
///
/// Returns [`DirectiveError::InvalidData`] if the data is not a table or any
/// entry is neither a string nor a `{ path, force? }` record.
pub fn parse(directive: &str, data: &Value) -> Result<Vec<LinkSpec>, DirectiveError> {
    let invalid = |message: String| DirectiveError::InvalidData {
        directive: directive.to_string(),
        message,
    };
    let Some(table) = data.as_object() else {
        return Err(invalid(format!(
            "expected a table of destination = source entries, found {}",
            kind(data)
        )));
    };

    table
        .iter()
        .map(|(destination, value)| {
            let source = LinkSource::deserialize(value).map_err(|_| {
                invalid(format!(
                    "entry '{destination}' must be a path string or {{ path, force }}, found {}",
                    kind(value)
                ))
            })?;
            Ok(LinkSpec {
                destination: destination.clone(),
                source,
            })
        })
        .collect()
}

/// Short name of a JSON value's kind, for error messages.
const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}
