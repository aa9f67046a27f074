//! Spec files: a command and its options kept in JSON or YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! command:
//!   name: greet
//!   version: "1.0.0"
//!   params: [who]
//!   params_required: 1
//!   summary: Print a greeting
//! options:
//!   - name: shout
//!     alias: s
//!     is_flag: true
//!     help: Print in upper case
//!   - name: times
//!     alias: t
//!     type: number
//!     default: 1
//!     help: Number of repetitions
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CommandSpec, OptionSpec, Registry, SpecError};

/// Errors that can occur while loading a spec file.
#[derive(Debug, Error)]
pub enum SpecFileError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported spec file extension: {0}")]
    UnsupportedFormat(String),

    /// The file parsed but the spec it describes is invalid.
    #[error("invalid spec: {0}")]
    InvalidSpec(#[from] SpecError),
}

/// Serializable command spec with its ordered option list.
///
/// # Examples
///
/// ```
/// use optspec_core::SpecFile;
///
/// let yaml = "
/// command:
///   name: greet
/// options:
///   - name: shout
///     is_flag: true
/// ";
/// let file = SpecFile::from_yaml_str(yaml).unwrap();
/// let registry = file.into_registry().unwrap();
/// assert!(registry.lookup("shout").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecFile {
    pub command: CommandSpec,
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl SpecFile {
    /// Loads a spec file, choosing the format from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](SpecFileError::IoError) if the file cannot be read,
    /// [`UnsupportedFormat`](SpecFileError::UnsupportedFormat) for unknown
    /// extensions, or a JSON/YAML error if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpecFileError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let spec = match ext.as_str() {
            "json" => serde_json::from_reader(reader)?,
            "yaml" | "yml" => serde_yaml::from_reader(reader)?,
            _ => return Err(SpecFileError::UnsupportedFormat(path.display().to_string())),
        };
        Ok(spec)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SpecFileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SpecFileError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validates the spec and builds a [`Registry`] from it.
    pub fn into_registry(self) -> Result<Registry, SpecFileError> {
        Ok(Registry::build(self.command, self.options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Value, ValueType};

    #[test]
    fn test_yaml_spec_keeps_option_order() {
        let yaml = r#"
command:
  name: greet
  params: [who]
  params_required: 1
options:
  - name: times
    alias: t
    type: number
    default: 1
  - name: shout
    is_flag: true
"#;
        let file = SpecFile::from_yaml_str(yaml).unwrap();

        assert_eq!(file.command.min_params(), 1);
        let names: Vec<&str> = file.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["times", "shout"]);
        assert_eq!(file.options[0].value_type, Some(ValueType::Number));
        assert_eq!(file.options[0].default, Some(Value::Number(1.0)));
    }

    #[test]
    fn test_json_spec_without_options() {
        let file = SpecFile::from_json_str(r#"{"command": {"name": "tool"}}"#).unwrap();
        assert!(file.options.is_empty());
        assert_eq!(file.into_registry().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_spec_surfaces_spec_error() {
        let json = r#"{"command": {"name": "tool"}, "options": [{"name": "q", "is_flag": true}]}"#;
        let err = SpecFile::from_json_str(json)
            .unwrap()
            .into_registry()
            .unwrap_err();

        assert!(matches!(
            err,
            SpecFileError::InvalidSpec(SpecError::InvalidOptionName(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.toml");
        std::fs::write(&path, "").unwrap();

        let err = SpecFile::load(&path).unwrap_err();
        assert!(matches!(err, SpecFileError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.yml");
        std::fs::write(&path, "command:\n  name: tool\n  version: \"2.0\"\n").unwrap();

        let file = SpecFile::load(&path).unwrap();
        assert_eq!(file.command.version.as_deref(), Some("2.0"));
    }
}
