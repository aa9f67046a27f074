//! Core spec types, validation and the option registry.
//!
//! This crate defines the declarative side of option parsing:
//!
//! - [`CommandSpec`] — the command name, version, positional parameters and
//!   help text.
//! - [`OptionSpec`] — one option with its alias, type, default and flags.
//! - [`Registry`] — the validated, immutable set of options for a command,
//!   including the implicit `help` and `version` options.
//! - [`SpecFile`] — a command and its options loaded from JSON or YAML.
//!
//! Validation happens once in [`Registry::build`] and fails fast with a
//! [`SpecError`]: these are mistakes in the program's spec, not in user input.
//! Parsing arguments against a registry lives in the `optspec-parser` crate.
//!
//! # Example
//!
//! ```
//! use optspec_core::*;
//!
//! let registry = Registry::build(
//!     CommandSpec::new("mycli")
//!         .with_version("0.1.0")
//!         .with_params(&["input"], 1),
//!     [
//!         OptionSpec::flag("verbose").with_help("Enable verbose output"),
//!         OptionSpec::value("jobs", ValueType::Number)
//!             .with_alias('j')
//!             .with_default(4.0),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(registry.lookup("j"), registry.lookup("jobs"));
//! assert_eq!(registry.len(), 4); // help + version + verbose + jobs
//! ```

mod registry;
mod spec_file;
mod types;
mod validate;

pub use registry::{HELP_OPTION, OptionEntry, OptionId, Registry, VERSION_OPTION};
pub use spec_file::{SpecFile, SpecFileError};
pub use types::*;
pub use validate::{SpecError, is_valid_name, validate_command, validate_option};
