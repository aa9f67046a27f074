//! Spec validation.
//!
//! Validates the structural invariants of a [`CommandSpec`] and its
//! [`OptionSpec`]s before a [`Registry`](crate::Registry) is built, catching
//! programmer mistakes such as malformed names, duplicate aliases and
//! mistyped defaults before any user input is looked at.
//!
//! # Examples
//!
//! ```
//! use optspec_core::*;
//!
//! assert!(is_valid_name("dry-run"));
//! assert!(!is_valid_name("x"));
//!
//! let bad = OptionSpec::flag("quiet").with_default(true);
//! assert_eq!(
//!     validate_option(&bad),
//!     Err(SpecError::FlagWithDefault("quiet".to_string()))
//! );
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{CommandSpec, OptionSpec, ValueType};

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*[A-Za-z0-9]$").expect("static regex must compile")
});

/// Spec validation errors.
///
/// Raised while building a [`Registry`](crate::Registry). These describe
/// mistakes in the program's own spec, never in end-user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Command name does not match the identifier pattern.
    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),
    /// Option name does not match the identifier pattern.
    #[error("invalid option name: {0:?}")]
    InvalidOptionName(String),
    /// Positional parameter name does not match the identifier pattern.
    #[error("invalid parameter name: {0:?}")]
    InvalidParamName(String),
    /// Two positional parameters share a name.
    #[error("duplicate parameter: {0}")]
    DuplicateParam(String),
    /// Alias is not a single ASCII letter or digit.
    #[error("invalid alias {alias:?} for option {option}")]
    InvalidAlias { option: String, alias: char },
    /// Two options share a name (including the implicit `help`/`version`).
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    /// Two options share an alias (including the implicit `h`/`v`).
    #[error("duplicate alias {alias:?} on option {option}")]
    DuplicateAlias { option: String, alias: char },
    /// A flag option declares a value type.
    #[error("flag option {0} cannot declare a type")]
    FlagWithType(String),
    /// A flag option declares a default.
    #[error("flag option {0} cannot declare a default")]
    FlagWithDefault(String),
    /// A default value does not have the option's declared type.
    #[error("default of option {option} must be {expected}, got {actual}")]
    DefaultTypeMismatch {
        option: String,
        expected: ValueType,
        actual: ValueType,
    },
    /// `params_required` exceeds the number of declared parameters.
    #[error("params_required {required} exceeds {declared} declared parameters")]
    ParamsRequiredOutOfRange { required: usize, declared: usize },
}

/// Returns `true` if `name` is identifier-shaped: starts with a letter, may
/// contain letters, digits, `_` and `-`, ends with a letter or digit, and is
/// at least two characters long.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Validates a command spec on its own.
///
/// Checks the command name, each parameter name, duplicate parameters and the
/// `params_required` bound.
///
/// # Examples
///
/// ```
/// use optspec_core::*;
///
/// let cmd = CommandSpec::new("copy").with_params(&["src", "dst"], 2);
/// assert!(validate_command(&cmd).is_ok());
///
/// let cmd = CommandSpec::new("copy").with_params(&["src"], 2);
/// assert!(matches!(
///     validate_command(&cmd),
///     Err(SpecError::ParamsRequiredOutOfRange { required: 2, declared: 1 })
/// ));
/// ```
pub fn validate_command(cmd: &CommandSpec) -> Result<(), SpecError> {
    if !is_valid_name(&cmd.name) {
        return Err(SpecError::InvalidCommandName(cmd.name.clone()));
    }

    let Some(params) = &cmd.params else {
        return Ok(());
    };

    let mut seen: HashSet<&str> = HashSet::new();
    for param in params {
        if !is_valid_name(param) {
            return Err(SpecError::InvalidParamName(param.clone()));
        }
        if !seen.insert(param) {
            return Err(SpecError::DuplicateParam(param.clone()));
        }
    }

    let required = cmd.min_params();
    if required > params.len() {
        return Err(SpecError::ParamsRequiredOutOfRange {
            required,
            declared: params.len(),
        });
    }

    Ok(())
}

/// Validates one option spec in isolation.
///
/// Uniqueness of names and aliases across options is checked by
/// [`Registry::build`](crate::Registry::build), which sees all of them.
pub fn validate_option(opt: &OptionSpec) -> Result<(), SpecError> {
    if !is_valid_name(&opt.name) {
        return Err(SpecError::InvalidOptionName(opt.name.clone()));
    }

    if let Some(alias) = opt.alias {
        if !alias.is_ascii_alphanumeric() {
            return Err(SpecError::InvalidAlias {
                option: opt.name.clone(),
                alias,
            });
        }
    }

    if opt.is_flag {
        if opt.value_type.is_some() {
            return Err(SpecError::FlagWithType(opt.name.clone()));
        }
        if opt.default.is_some() {
            return Err(SpecError::FlagWithDefault(opt.name.clone()));
        }
        return Ok(());
    }

    if let Some(default) = &opt.default {
        let expected = opt.value_type.unwrap_or_default();
        let actual = default.value_type();
        if expected != actual {
            return Err(SpecError::DefaultTypeMismatch {
                option: opt.name.clone(),
                expected,
                actual,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_name_pattern() {
        assert!(is_valid_name("foo"));
        assert!(is_valid_name("dry-run"));
        assert!(is_valid_name("max_depth2"));
        assert!(is_valid_name("ab"));

        assert!(!is_valid_name("a"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("2fast"));
        assert!(!is_valid_name("trailing-"));
        assert!(!is_valid_name("trailing_"));
        assert!(!is_valid_name("-lead"));
        assert!(!is_valid_name("has space"));
    }

    #[test]
    fn test_validate_command_rejects_bad_name() {
        let cmd = CommandSpec::new("x");
        assert_eq!(
            validate_command(&cmd),
            Err(SpecError::InvalidCommandName("x".to_string()))
        );
    }

    #[test]
    fn test_validate_command_rejects_bad_param() {
        let cmd = CommandSpec::new("tool").with_params(&["ok", "not ok"], 0);
        assert_eq!(
            validate_command(&cmd),
            Err(SpecError::InvalidParamName("not ok".to_string()))
        );
    }

    #[test]
    fn test_validate_command_rejects_duplicate_param() {
        let cmd = CommandSpec::new("tool").with_params(&["file", "file"], 0);
        assert_eq!(
            validate_command(&cmd),
            Err(SpecError::DuplicateParam("file".to_string()))
        );
    }

    #[test]
    fn test_params_required_without_params_is_accepted() {
        let cmd = CommandSpec::new("tool").with_min_params(3);
        assert!(validate_command(&cmd).is_ok());
    }

    #[test]
    fn test_validate_option_rejects_flag_with_type() {
        let mut opt = OptionSpec::flag("quiet");
        opt.value_type = Some(ValueType::Boolean);
        assert_eq!(
            validate_option(&opt),
            Err(SpecError::FlagWithType("quiet".to_string()))
        );
    }

    #[test]
    fn test_validate_option_rejects_mismatched_default() {
        let opt = OptionSpec::value("port", ValueType::Number).with_default("80");
        assert_eq!(
            validate_option(&opt),
            Err(SpecError::DefaultTypeMismatch {
                option: "port".to_string(),
                expected: ValueType::Number,
                actual: ValueType::String,
            })
        );
    }

    #[test]
    fn test_untyped_option_default_must_be_string() {
        let mut opt = OptionSpec {
            name: "mode".to_string(),
            ..Default::default()
        };
        opt.default = Some(Value::Boolean(true));
        assert!(matches!(
            validate_option(&opt),
            Err(SpecError::DefaultTypeMismatch {
                expected: ValueType::String,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_option_rejects_punctuation_alias() {
        let opt = OptionSpec::flag("quiet").with_alias('-');
        assert!(matches!(
            validate_option(&opt),
            Err(SpecError::InvalidAlias { alias: '-', .. })
        ));
    }
}
