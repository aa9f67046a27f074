//! The validated option registry.
//!
//! A [`Registry`] is built once from a [`CommandSpec`] and its
//! [`OptionSpec`]s. Building validates every spec, injects the implicit
//! `help` and `version` options, and precomputes the display strings the
//! usage and help renderers need. After that the registry is read-only.

use std::collections::HashMap;

use tracing::debug;

use crate::validate::{validate_command, validate_option};
use crate::{CommandSpec, OptionSpec, SpecError, Value};

/// Name of the implicit help option.
pub const HELP_OPTION: &str = "help";
/// Name of the implicit version option.
pub const VERSION_OPTION: &str = "version";

const HELP_ALIAS: char = 'h';
const VERSION_ALIAS: char = 'v';

/// Index of an option inside a [`Registry`].
///
/// Name and alias lookups both resolve to the same id, so a parser can track
/// what it has seen per option rather than per spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(usize);

impl OptionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A registered option together with its precomputed display strings.
#[derive(Debug, Clone)]
pub struct OptionEntry {
    spec: OptionSpec,
    usage_token: String,
    help_spec: String,
    implicit: bool,
}

impl OptionEntry {
    fn new(spec: OptionSpec, implicit: bool) -> Self {
        let long = match spec.effective_type() {
            Some(value_type) => format!("--{} <{value_type}>", spec.name),
            None => format!("--{}", spec.name),
        };
        let help_spec = match spec.alias {
            Some(alias) => format!("-{alias}, {long}"),
            None => long.clone(),
        };
        Self {
            spec,
            usage_token: long,
            help_spec,
            implicit,
        }
    }

    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Synopsis form: `--name` or `--name <type>`.
    pub fn usage_token(&self) -> &str {
        &self.usage_token
    }

    /// Option table form: `-a, --name <type>`, without the alias segment when
    /// there is no alias.
    pub fn help_spec(&self) -> &str {
        &self.help_spec
    }

    /// Returns `true` for the built-in `help` and `version` options.
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Help text annotated with the default value, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use optspec_core::*;
    ///
    /// let registry = Registry::build(
    ///     CommandSpec::new("serve"),
    ///     [OptionSpec::value("port", ValueType::Number)
    ///         .with_default(8080.0)
    ///         .with_help("Port to listen on")],
    /// )
    /// .unwrap();
    /// let id = registry.lookup("port").unwrap();
    /// assert_eq!(registry.entry(id).help_line(), "Port to listen on (default: 8080)");
    /// ```
    pub fn help_line(&self) -> String {
        match (&self.spec.help, &self.spec.default) {
            (Some(help), Some(default)) => format!("{help} (default: {default})"),
            (None, Some(default)) => format!("(default: {default})"),
            (Some(help), None) => help.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Validated, immutable set of options for one command.
///
/// # Examples
///
/// ```
/// use optspec_core::*;
///
/// let registry = Registry::build(
///     CommandSpec::new("tool").with_version("0.3.1"),
///     [OptionSpec::value("output", ValueType::String).with_alias('o')],
/// )
/// .unwrap();
///
/// // Name and alias resolve to the same option.
/// assert_eq!(registry.lookup("output"), registry.lookup("o"));
/// // Implicit options are always registered.
/// assert!(registry.lookup("help").is_some());
/// assert!(registry.lookup("v").is_some());
/// assert_eq!(registry.max_spec_width(), "-o, --output <string>".len());
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    command: CommandSpec,
    entries: Vec<OptionEntry>,
    by_name: HashMap<String, OptionId>,
    by_alias: HashMap<char, OptionId>,
    sorted: Vec<OptionId>,
    required: Vec<OptionId>,
    max_spec_width: usize,
}

impl Registry {
    /// Validates the specs and builds the registry.
    ///
    /// Options are kept in the order given; that order decides which missing
    /// required option is reported first.
    ///
    /// # Errors
    ///
    /// Returns the first [`SpecError`] found. Validation stops at the first
    /// problem.
    pub fn build<I>(command: CommandSpec, options: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = OptionSpec>,
    {
        validate_command(&command)?;

        let mut registry = Self {
            command,
            entries: Vec::new(),
            by_name: HashMap::new(),
            by_alias: HashMap::new(),
            sorted: Vec::new(),
            required: Vec::new(),
            max_spec_width: 0,
        };

        let mut implicit = vec![
            OptionSpec::flag(HELP_OPTION)
                .with_alias(HELP_ALIAS)
                .with_help("print this help message and exit"),
        ];
        if registry.command.version.is_some() {
            implicit.push(
                OptionSpec::flag(VERSION_OPTION)
                    .with_alias(VERSION_ALIAS)
                    .with_help("print version string and exit"),
            );
        }

        // Implicit options are inserted first so a clash is reported against
        // the user-declared option.
        for spec in implicit {
            registry.insert(spec, true)?;
        }
        for spec in options {
            validate_option(&spec)?;
            registry.insert(spec, false)?;
        }

        let mut sorted: Vec<OptionId> = (0..registry.entries.len()).map(OptionId).collect();
        sorted.sort_by(|a, b| registry.entries[a.0].name().cmp(registry.entries[b.0].name()));
        registry.sorted = sorted;

        // Keep declaration order for user options; implicit ones are flags
        // and never required.
        registry.required = registry
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.spec.required)
            .map(|(idx, _)| OptionId(idx))
            .collect();

        debug!(
            command = %registry.command.name,
            options = registry.entries.len(),
            max_spec_width = registry.max_spec_width,
            "Built option registry"
        );

        Ok(registry)
    }

    fn insert(&mut self, spec: OptionSpec, implicit: bool) -> Result<(), SpecError> {
        let id = OptionId(self.entries.len());

        if self.by_name.contains_key(&spec.name) {
            return Err(SpecError::DuplicateOption(spec.name));
        }
        if let Some(alias) = spec.alias {
            if self.by_alias.contains_key(&alias) {
                return Err(SpecError::DuplicateAlias {
                    option: spec.name,
                    alias,
                });
            }
            self.by_alias.insert(alias, id);
        }
        self.by_name.insert(spec.name.clone(), id);

        let entry = OptionEntry::new(spec, implicit);
        self.max_spec_width = self.max_spec_width.max(entry.help_spec.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Resolves an option by name, or by alias when `key` is one character.
    pub fn lookup(&self, key: &str) -> Option<OptionId> {
        if let Some(id) = self.by_name.get(key) {
            return Some(*id);
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(alias), None) => self.by_alias.get(&alias).copied(),
            _ => None,
        }
    }

    /// Returns the entry for an id produced by this registry.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different registry with more options.
    pub fn entry(&self, id: OptionId) -> &OptionEntry {
        &self.entries[id.0]
    }

    /// Iterates options in registration order: the implicit options first,
    /// then user options in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (OptionId, &OptionEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (OptionId(idx), entry))
    }

    /// Iterates options sorted by name, as shown in the help table.
    pub fn sorted(&self) -> impl Iterator<Item = &OptionEntry> {
        self.sorted.iter().map(|id| &self.entries[id.0])
    }

    /// Iterates required options in declaration order.
    pub fn required(&self) -> impl Iterator<Item = OptionId> + '_ {
        self.required.iter().copied()
    }

    /// Iterates options that declare a default, with that default.
    pub fn defaults(&self) -> impl Iterator<Item = (OptionId, &Value)> {
        self.entries().filter_map(|(id, entry)| entry.spec.default.as_ref().map(|d| (id, d)))
    }

    /// Width of the widest help-line spec, used to align the option table.
    pub fn max_spec_width(&self) -> usize {
        self.max_spec_width
    }

    /// Number of registered options, implicit ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
