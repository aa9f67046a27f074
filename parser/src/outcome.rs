//! Parse outcomes other than a successful result.
//!
//! A parse that does not produce [`ParsedArgs`](crate::ParsedArgs) ends in
//! one of three ways: the user asked for help, asked for the version, or made
//! a mistake. Each [`UsageOutcome`] carries the exact text to show and the
//! exit status to end with. Printing and exiting is left to the caller.

use std::io::{self, Write};

use optspec_core::{SpecError, ValueType};
use thiserror::Error;

/// Exit status for help and version output.
pub const SUCCESS_EXIT_CODE: i32 = 0;
/// Exit status for every usage error.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Mistakes in end-user input.
///
/// The `Display` text is the literal message shown to the user. Options are
/// cited as typed (`-f` or `--foo`), except for missing required options,
/// which are cited by their canonical `--name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Unknown option name, or a token with three or more leading dashes.
    #[error("unknown option: \"{0}\"")]
    UnknownOption(String),
    /// A value-taking option was the last token.
    #[error("option \"{0}\" value is not specified")]
    ValueNotSpecified(String),
    /// A value could not be converted to the option's type.
    #[error("option \"{option}\" value \"{value}\" is not {expected}")]
    InvalidValue {
        option: String,
        value: String,
        expected: ValueType,
    },
    /// The same option was given twice, by name or alias.
    #[error("option \"{0}\" is specified twice")]
    SpecifiedTwice(String),
    /// More positionals than declared parameters.
    #[error("too many parameters: \"{0}\"")]
    TooManyParams(String),
    /// A required option was neither given nor defaulted.
    #[error("required option \"--{0}\" is not specified")]
    RequiredOptionMissing(String),
    /// Fewer positionals than `params_required`.
    #[error("parameters must be specified at least {0} required")]
    NotEnoughParams(usize),
}

/// How a parse ended when it did not return arguments.
///
/// `Display` yields the full text to write, trailing newlines included.
///
/// # Examples
///
/// ```
/// use optspec_core::{CommandSpec, Registry};
/// use optspec_parser::{Parser, UsageOutcome};
///
/// let registry = Registry::build(CommandSpec::new("tool").with_version("2.1.0"), []).unwrap();
/// let outcome = Parser::new(&registry).parse(["--version"]).unwrap_err();
///
/// assert_eq!(outcome, UsageOutcome::Version("2.1.0\n".to_string()));
/// assert_eq!(outcome.exit_code(), 0);
///
/// let mut sink = Vec::new();
/// outcome.write_to(&mut sink).unwrap();
/// assert_eq!(sink, b"2.1.0\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageOutcome {
    /// Full help text.
    #[error("{0}")]
    Help(String),
    /// Version string followed by a newline.
    #[error("{0}")]
    Version(String),
    /// A usage error and its rendered message plus usage block.
    #[error("{text}")]
    Failure { error: UsageError, text: String },
}

impl UsageOutcome {
    /// Exit status the process should end with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Help(_) | Self::Version(_) => SUCCESS_EXIT_CODE,
            Self::Failure { .. } => FAILURE_EXIT_CODE,
        }
    }

    /// The text to write.
    pub fn text(&self) -> &str {
        match self {
            Self::Help(text) | Self::Version(text) => text,
            Self::Failure { text, .. } => text,
        }
    }

    /// The usage error, for the failure case.
    pub fn error(&self) -> Option<&UsageError> {
        match self {
            Self::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Writes the text to `out` and flushes it.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.text().as_bytes())?;
        out.flush()
    }

    /// Writes the text to stdout and ends the process with
    /// [`exit_code`](Self::exit_code).
    pub fn exit(self) -> ! {
        let mut stdout = io::stdout().lock();
        if let Err(err) = self.write_to(&mut stdout) {
            tracing::warn!(error = %err, "Failed to write usage outcome");
        }
        std::process::exit(self.exit_code())
    }
}

/// Error from the one-shot [`parse`](crate::parse) entry point, which builds
/// the registry and parses in one call.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The command or option spec is invalid.
    #[error(transparent)]
    Spec(#[from] SpecError),
    /// The parse ended in help, version or a usage error.
    #[error(transparent)]
    Usage(#[from] UsageOutcome),
}
