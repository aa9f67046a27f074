//! The successful result of a parse.

use std::collections::BTreeMap;

use optspec_core::Value;
use serde::Serialize;

/// Typed option values and positional arguments from one parse.
///
/// Options appear only when they were given or defaulted. Positionals keep
/// their encounter order.
///
/// # Examples
///
/// ```
/// use optspec_core::{CommandSpec, OptionSpec, Registry, ValueType};
/// use optspec_parser::Parser;
///
/// let registry = Registry::build(
///     CommandSpec::new("tool"),
///     [
///         OptionSpec::value("jobs", ValueType::Number).with_alias('j'),
///         OptionSpec::flag("quiet"),
///     ],
/// )
/// .unwrap();
///
/// let args = Parser::new(&registry).parse(["-j", "4", "a.txt"]).unwrap();
/// assert_eq!(args.get_number("jobs"), Some(4.0));
/// assert!(!args.flag("quiet"));
/// assert_eq!(args.params(), ["a.txt"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedArgs {
    options: BTreeMap<String, Value>,
    params: Vec<String>,
}

impl ParsedArgs {
    pub(crate) fn new(options: BTreeMap<String, Value>, params: Vec<String>) -> Self {
        Self { options, params }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Returns `true` if the option resolved to boolean `true`.
    pub fn flag(&self, name: &str) -> bool {
        self.get_bool(name).unwrap_or(false)
    }

    /// Option values keyed by option name.
    pub fn options(&self) -> &BTreeMap<String, Value> {
        &self.options
    }

    /// Positional arguments in encounter order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Positional argument at a 0-based index.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    pub fn into_parts(self) -> (BTreeMap<String, Value>, Vec<String>) {
        (self.options, self.params)
    }
}
