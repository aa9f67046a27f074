//! Argument parsing and usage rendering for optspec registries.
//!
//! This crate takes a validated [`Registry`] from `optspec-core` and an
//! already-split argument list, and produces either typed [`ParsedArgs`] or a
//! [`UsageOutcome`]: help text, the version string, or a usage error with the
//! usage block appended. Outcomes carry their exit status; writing them out
//! and ending the process happens only at the boundary
//! ([`UsageOutcome::exit`], [`Parser::parse_or_exit`]).
//!
//! # Main entry points
//!
//! - [`Parser::parse`] — parse against a registry built once and reused.
//! - [`parse`] — build the registry and parse in one call.
//! - [`usage_text`] / [`help_text`] — render text without parsing.
//!
//! # Example
//!
//! ```
//! use optspec_core::{CommandSpec, OptionSpec, ValueType};
//! use optspec_parser::{ParseError, parse};
//!
//! let cmd = CommandSpec::new("test").with_params(&["param1", "param2"], 2);
//! let options = [OptionSpec::value("foo", ValueType::String).with_alias('f')];
//!
//! let args = parse(cmd.clone(), options.clone(), ["-f", "bar", "one", "two"]).unwrap();
//! assert_eq!(args.get_str("foo"), Some("bar"));
//! assert_eq!(args.params(), ["one", "two"]);
//!
//! let Err(ParseError::Usage(outcome)) = parse(cmd, options, ["hello"]) else {
//!     panic!("expected a usage error");
//! };
//! assert!(outcome.text().contains("parameters must be specified at least 2 required"));
//! assert_eq!(outcome.exit_code(), 1);
//! ```
//!
//! [`Registry`]: optspec_core::Registry

mod args;
mod coerce;
mod outcome;
mod render;
mod scan;

pub use args::ParsedArgs;
pub use coerce::coerce;
pub use outcome::{FAILURE_EXIT_CODE, ParseError, SUCCESS_EXIT_CODE, UsageError, UsageOutcome};
pub use render::{LINE_WIDTH, failure_text, help_text, option_table, usage_text};
pub use scan::Parser;

use optspec_core::{CommandSpec, OptionSpec, Registry};

/// Builds a registry from the specs and parses `args` against it.
///
/// Prefer [`Parser`] with a reused [`Registry`] when parsing more than once.
///
/// # Errors
///
/// Returns [`ParseError::Spec`] when the specs are invalid, and
/// [`ParseError::Usage`] for help, version and usage errors.
pub fn parse<O, I, S>(command: CommandSpec, options: O, args: I) -> Result<ParsedArgs, ParseError>
where
    O: IntoIterator<Item = OptionSpec>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let registry = Registry::build(command, options)?;
    Ok(Parser::new(&registry).parse(args)?)
}
