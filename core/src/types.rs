//! Spec type definitions for declarative option parsing.
//!
//! This module defines the data model a caller uses to describe a command:
//! the command itself ([`CommandSpec`]), each of its options ([`OptionSpec`]),
//! the value types an option accepts ([`ValueType`]) and the typed values a
//! parse produces ([`Value`]). The types are designed for serialization with
//! [`serde`] so specs can be kept in JSON or YAML files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value type accepted by a non-flag option.
///
/// # Examples
///
/// ```
/// use optspec_core::ValueType;
///
/// assert_eq!(ValueType::default(), ValueType::String);
/// assert_eq!(ValueType::Number.to_string(), "number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Taken verbatim (the default).
    #[default]
    String,
    /// Locale-free floating point number.
    Number,
    /// One of `true|yes|y` or `false|no|n`.
    Boolean,
}

impl ValueType {
    /// Returns the lowercase label used in usage tokens and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed option value, either parsed from input or declared as a default.
///
/// Serialized untagged, so `"bar"`, `3.5` and `true` map directly onto the
/// three variants.
///
/// # Examples
///
/// ```
/// use optspec_core::{Value, ValueType};
///
/// let v = Value::from(8080.0);
/// assert_eq!(v.value_type(), ValueType::Number);
/// assert_eq!(v.to_string(), "8080");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Returns the [`ValueType`] this value belongs to.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean(_) => ValueType::Boolean,
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Spec for one command option.
///
/// Use [`flag`](OptionSpec::flag) for value-less switches and
/// [`value`](OptionSpec::value) for options consuming the next argument, then
/// chain builder methods like [`with_alias`](OptionSpec::with_alias).
///
/// # Examples
///
/// ```
/// use optspec_core::{OptionSpec, Value, ValueType};
///
/// let verbose = OptionSpec::flag("verbose")
///     .with_alias('V')
///     .with_help("Enable verbose output");
/// assert!(verbose.is_flag);
///
/// let port = OptionSpec::value("port", ValueType::Number)
///     .with_default(8080.0);
/// assert_eq!(port.default, Some(Value::Number(8080.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long name, matched after `-` or `--` (e.g. "output")
    pub name: String,
    /// Single-character short form (e.g. 'o')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<char>,
    /// Must the option be resolved, from input or a default?
    #[serde(default)]
    pub required: bool,
    /// Takes no value; presence yields `true`
    #[serde(default)]
    pub is_flag: bool,
    /// Declared value type; `None` means string for non-flag options
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    /// Value applied when the option is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// One-line help shown in the option table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Long description shown under the option in full help
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionSpec {
    /// Creates a flag option (no value).
    ///
    /// # Examples
    ///
    /// ```
    /// use optspec_core::OptionSpec;
    ///
    /// let flag = OptionSpec::flag("force");
    /// assert!(flag.is_flag);
    /// assert!(flag.value_type.is_none());
    /// ```
    pub fn flag(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_flag: true,
            ..Default::default()
        }
    }

    /// Creates an option that consumes one value of the given type.
    pub fn value(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type: Some(value_type),
            ..Default::default()
        }
    }

    /// Adds a short alias.
    pub fn with_alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds one-line help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Adds a long description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns the effective value type, or `None` for flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use optspec_core::{OptionSpec, ValueType};
    ///
    /// let untyped = OptionSpec { name: "foo".into(), ..Default::default() };
    /// assert_eq!(untyped.effective_type(), Some(ValueType::String));
    /// assert_eq!(OptionSpec::flag("quiet").effective_type(), None);
    /// ```
    pub fn effective_type(&self) -> Option<ValueType> {
        if self.is_flag {
            None
        } else {
            Some(self.value_type.unwrap_or_default())
        }
    }
}

/// Spec for the command being parsed.
///
/// # Examples
///
/// ```
/// use optspec_core::CommandSpec;
///
/// let cmd = CommandSpec::new("copy")
///     .with_version("1.2.0")
///     .with_params(&["source", "dest"], 1)
///     .with_summary("Copy a file");
///
/// assert_eq!(cmd.params.as_ref().map(Vec::len), Some(2));
/// assert_eq!(cmd.min_params(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name shown in usage lines
    pub name: String,
    /// Version string; enables the implicit `--version` option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Positional parameter names; `None` accepts any number of positionals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<String>>,
    /// Minimum number of positionals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params_required: Option<usize>,
    /// One-line summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Multi-line description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandSpec {
    /// Creates a command spec with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the version string.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Declares the positional parameters and how many of them are required.
    pub fn with_params(mut self, params: &[&str], required: usize) -> Self {
        self.params = Some(params.iter().map(|p| p.to_string()).collect());
        self.params_required = Some(required);
        self
    }

    /// Sets only the minimum positional count, leaving the list open.
    pub fn with_min_params(mut self, required: usize) -> Self {
        self.params_required = Some(required);
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns the required positional count (0 when unset).
    pub fn min_params(&self) -> usize {
        self.params_required.unwrap_or(0)
    }
}
