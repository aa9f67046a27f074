//! The argument scanner.
//!
//! A single left-to-right pass over the arguments with one pending-value
//! slot. Tokens are classified by their leading dashes:
//!
//! - no dash: positional argument
//! - `-name` / `--name`: option lookup by name or alias (the dash count does
//!   not matter)
//! - three or more dashes: always an unknown option
//!
//! After the scan, help and version requests win over everything else, then
//! defaults are applied, then required options and the minimum positional
//! count are checked.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::LazyLock;

use optspec_core::{HELP_OPTION, OptionId, Registry, VERSION_OPTION, Value, ValueType};
use regex::Regex;
use tracing::{debug, trace};

use crate::coerce::coerce;
use crate::render::{failure_text, help_text};
use crate::{ParsedArgs, UsageError, UsageOutcome};

static OPTION_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(-+)(.*)$").expect("static regex must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Positional,
    Option(&'a str),
    Malformed,
}

// The name is everything after the dashes, so `--dry-run` looks up `dry-run`.
fn classify(arg: &str) -> Token<'_> {
    let Some(caps) = OPTION_TOKEN_RE.captures(arg) else {
        return Token::Positional;
    };
    let dashes = caps.get(1).map_or(0, |m| m.len());
    let name = caps.get(2).map_or("", |m| m.as_str());
    if dashes > 2 {
        Token::Malformed
    } else {
        Token::Option(name)
    }
}

enum State<'a> {
    Scan,
    ConsumeValue {
        id: OptionId,
        token: &'a str,
        value_type: ValueType,
    },
}

/// Parses argument lists against a [`Registry`].
///
/// The parser borrows the registry and holds no state of its own, so one
/// registry can serve any number of parses.
///
/// # Examples
///
/// ```
/// use optspec_core::{CommandSpec, OptionSpec, Registry, ValueType};
/// use optspec_parser::{Parser, UsageError};
///
/// let registry = Registry::build(
///     CommandSpec::new("test"),
///     [OptionSpec::value("foo", ValueType::Number).with_alias('f')],
/// )
/// .unwrap();
/// let parser = Parser::new(&registry);
///
/// let args = parser.parse(["-f", "3"]).unwrap();
/// assert_eq!(args.get_number("foo"), Some(3.0));
///
/// let outcome = parser.parse(["--foo", "hello"]).unwrap_err();
/// assert!(matches!(outcome.error(), Some(UsageError::InvalidValue { .. })));
/// assert!(outcome.text().starts_with("option \"--foo\" value \"hello\" is not number\n\n"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    registry: &'r Registry,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Parses `args` (without the program name).
    ///
    /// # Errors
    ///
    /// Returns a [`UsageOutcome`] when help or the version was requested or
    /// the input is invalid. Only the first usage error is reported.
    pub fn parse<I, S>(&self, args: I) -> Result<ParsedArgs, UsageOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let (mut values, params) = self.scan(&args).map_err(|err| self.failure(err))?;

        if let Some(outcome) = self.requested_output(&values) {
            return Err(outcome);
        }

        for (id, default) in self.registry.defaults() {
            let slot = &mut values[id.index()];
            if slot.is_none() {
                trace!(option = self.registry.entry(id).name(), "Applying default");
                *slot = Some(default.clone());
            }
        }

        self.check_required(&values, &params)
            .map_err(|err| self.failure(err))?;

        let options: BTreeMap<String, Value> = self
            .registry
            .entries()
            .filter_map(|(id, entry)| {
                values[id.index()]
                    .take()
                    .map(|value| (entry.name().to_string(), value))
            })
            .collect();

        debug!(
            command = %self.registry.command().name,
            options = options.len(),
            params = params.len(),
            "Parsed arguments"
        );
        Ok(ParsedArgs::new(options, params))
    }

    /// Parses `args`; on any outcome other than success, writes its text to
    /// `out` and returns the exit status instead.
    pub fn parse_or_report<I, S, W>(&self, args: I, out: &mut W) -> Result<ParsedArgs, i32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: Write,
    {
        self.parse(args).map_err(|outcome| {
            if let Err(err) = outcome.write_to(out) {
                tracing::warn!(error = %err, "Failed to write usage outcome");
            }
            outcome.exit_code()
        })
    }

    /// Parses `args`; on any outcome other than success, prints its text to
    /// stdout and exits the process.
    pub fn parse_or_exit<I, S>(&self, args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.parse(args) {
            Ok(parsed) => parsed,
            Err(outcome) => outcome.exit(),
        }
    }

    fn scan<S: AsRef<str>>(
        &self,
        args: &[S],
    ) -> Result<(Vec<Option<Value>>, Vec<String>), UsageError> {
        let max_params = self.registry.command().params.as_ref().map(Vec::len);
        let mut values: Vec<Option<Value>> = vec![None; self.registry.len()];
        let mut params: Vec<String> = Vec::new();
        let mut state = State::Scan;

        for arg in args {
            let arg = arg.as_ref();
            state = match state {
                State::ConsumeValue {
                    id,
                    token,
                    value_type,
                } => {
                    values[id.index()] = Some(coerce(value_type, token, arg)?);
                    State::Scan
                }
                State::Scan => match classify(arg) {
                    Token::Positional => {
                        if max_params.is_some_and(|max| params.len() >= max) {
                            return Err(UsageError::TooManyParams(arg.to_string()));
                        }
                        trace!(param = arg, "Positional argument");
                        params.push(arg.to_string());
                        State::Scan
                    }
                    Token::Malformed => return Err(UsageError::UnknownOption(arg.to_string())),
                    Token::Option(name) => {
                        let id = self
                            .registry
                            .lookup(name)
                            .ok_or_else(|| UsageError::UnknownOption(arg.to_string()))?;
                        if values[id.index()].is_some() {
                            return Err(UsageError::SpecifiedTwice(arg.to_string()));
                        }

                        let entry = self.registry.entry(id);
                        trace!(token = arg, option = entry.name(), "Option");
                        match entry.spec().effective_type() {
                            None => {
                                values[id.index()] = Some(Value::Boolean(true));
                                State::Scan
                            }
                            Some(value_type) => State::ConsumeValue {
                                id,
                                token: arg,
                                value_type,
                            },
                        }
                    }
                },
            };
        }

        if let State::ConsumeValue { token, .. } = state {
            return Err(UsageError::ValueNotSpecified(token.to_string()));
        }
        Ok((values, params))
    }

    fn requested_output(&self, values: &[Option<Value>]) -> Option<UsageOutcome> {
        let is_set = |name: &str| {
            self.registry.lookup(name).is_some_and(|id| {
                self.registry.entry(id).is_implicit() && values[id.index()].is_some()
            })
        };

        if is_set(HELP_OPTION) {
            debug!(command = %self.registry.command().name, "Help requested");
            return Some(UsageOutcome::Help(help_text(self.registry)));
        }
        if is_set(VERSION_OPTION) {
            debug!(command = %self.registry.command().name, "Version requested");
            let version = self.registry.command().version.as_deref().unwrap_or_default();
            return Some(UsageOutcome::Version(format!("{version}\n")));
        }
        None
    }

    fn check_required(&self, values: &[Option<Value>], params: &[String]) -> Result<(), UsageError> {
        if let Some(id) = self
            .registry
            .required()
            .find(|id| values[id.index()].is_none())
        {
            return Err(UsageError::RequiredOptionMissing(
                self.registry.entry(id).name().to_string(),
            ));
        }

        let min_params = self.registry.command().min_params();
        if params.len() < min_params {
            return Err(UsageError::NotEnoughParams(min_params));
        }
        Ok(())
    }

    fn failure(&self, error: UsageError) -> UsageOutcome {
        debug!(command = %self.registry.command().name, error = %error, "Usage error");
        let text = failure_text(self.registry, &error);
        UsageOutcome::Failure { error, text }
    }
}
