//! Usage, help and error text rendering.
//!
//! The layout is fixed so output can be compared byte for byte:
//!
//! ```text
//! Usage:
//!   copy [-f] [--mode <string>] source [dest]
//!   copy --help
//!   copy --version
//! ```
//!
//! Help text is cut into fixed-width chunks by character count rather than at
//! word boundaries.

use optspec_core::{OptionEntry, Registry};

use crate::UsageError;

/// Column limit for usage lines and option table rows.
pub const LINE_WIDTH: usize = 76;

const MIN_HELP_CHUNK: usize = 20;
const DESCRIPTION_INDENT: &str = "      ";
const SEPARATOR: &str = "  : ";

/// Renders the usage block.
///
/// The first form lists the user-declared options in declaration order,
/// bracketed unless required, then the positional parameters. Once a line
/// has run past [`LINE_WIDTH`], the next token starts a continuation line
/// indented to the width of the command name.
///
/// # Examples
///
/// ```
/// use optspec_core::{CommandSpec, OptionSpec, Registry, ValueType};
/// use optspec_parser::usage_text;
///
/// let registry = Registry::build(
///     CommandSpec::new("copy").with_params(&["source", "dest"], 1),
///     [OptionSpec::value("mode", ValueType::String).required()],
/// )
/// .unwrap();
///
/// assert_eq!(
///     usage_text(&registry),
///     "Usage:\n  copy --mode <string> source [dest]\n  copy --help\n"
/// );
/// ```
pub fn usage_text(registry: &Registry) -> String {
    let cmd = registry.command();
    let lead = format!("  {}", cmd.name);
    let indent = " ".repeat(lead.len());

    let option_tokens = registry
        .entries()
        .filter(|(_, entry)| !entry.is_implicit())
        .map(|(_, entry)| option_token(entry));

    let mut lines = Vec::new();
    let mut line = lead.clone();
    for token in option_tokens.chain(param_tokens(registry)) {
        if line.len() > LINE_WIDTH {
            lines.push(std::mem::replace(&mut line, indent.clone()));
        }
        line.push(' ');
        line.push_str(&token);
    }
    lines.push(line);
    lines.push(format!("{lead} --help"));
    if cmd.version.is_some() {
        lines.push(format!("{lead} --version"));
    }

    let mut out = String::from("Usage:\n");
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Renders the full help text: summary, description, version, usage block
/// and the option table.
pub fn help_text(registry: &Registry) -> String {
    let cmd = registry.command();
    let mut out = String::new();

    if let Some(summary) = &cmd.summary {
        out.push_str(summary.trim_end());
        out.push_str("\n\n");
    }
    if let Some(description) = &cmd.description {
        out.push_str(description.trim_end());
        out.push_str("\n\n");
    }
    if let Some(version) = &cmd.version {
        out.push_str(&format!("Version: {version}\n\n"));
    }

    out.push_str(&usage_text(registry));
    out.push('\n');
    out.push_str("Options:\n");
    out.push_str(&option_table(registry));
    out
}

/// Renders a usage error: the message, a blank line, then the usage block.
pub fn failure_text(registry: &Registry, error: &UsageError) -> String {
    format!("{error}\n\n{}", usage_text(registry))
}

/// Renders the option table, one row per option sorted by name.
///
/// Specs are padded to the widest spec plus two. Help text continuation rows
/// start under the `:` column.
pub fn option_table(registry: &Registry) -> String {
    let width = registry.max_spec_width() + 2;
    let text_column = 2 + width + SEPARATOR.len();
    let chunk_width = LINE_WIDTH.saturating_sub(text_column).max(MIN_HELP_CHUNK);
    let continuation = " ".repeat(2 + width + 2);

    let mut out = String::new();
    for entry in registry.sorted() {
        let help = entry.help_line();
        let chunks = chunk(&help, chunk_width);
        let mut chunks = chunks.iter();

        let first = chunks.next().map(String::as_str).unwrap_or_default();
        let row = format!("  {:<width$}{SEPARATOR}{first}", entry.help_spec());
        if first.is_empty() {
            out.push_str(row.trim_end());
        } else {
            out.push_str(&row);
        }
        out.push('\n');
        for rest in chunks {
            out.push_str(&continuation);
            out.push_str(rest);
            out.push('\n');
        }

        if let Some(description) = &entry.spec().description {
            out.push('\n');
            for line in description.trim_end().lines() {
                if !line.trim().is_empty() {
                    out.push_str(DESCRIPTION_INDENT);
                    out.push_str(line.trim_end());
                }
                out.push('\n');
            }
            out.push('\n');
        }
    }
    out
}

fn option_token(entry: &OptionEntry) -> String {
    if entry.spec().required {
        entry.usage_token().to_string()
    } else {
        format!("[{}]", entry.usage_token())
    }
}

/// Required parameters bare, optional ones as a nested run: `a [b [c]]`.
fn param_tokens(registry: &Registry) -> Vec<String> {
    let cmd = registry.command();
    let Some(params) = &cmd.params else {
        return Vec::new();
    };

    let required = cmd.min_params().min(params.len());
    let (required_params, optional_params) = params.split_at(required);
    let optional = optional_params.len();

    let mut tokens: Vec<String> = required_params.to_vec();
    for (idx, param) in optional_params.iter().enumerate() {
        if idx + 1 == optional {
            tokens.push(format!("[{param}{}", "]".repeat(optional)));
        } else {
            tokens.push(format!("[{param}"));
        }
    }
    tokens
}

fn chunk(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|part| part.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use optspec_core::{CommandSpec, OptionSpec, ValueType};

    use super::*;

    #[test]
    fn test_param_tokens_nest_optional_params() {
        let registry = Registry::build(
            CommandSpec::new("tool").with_params(&["aa", "bb", "cc"], 1),
            [],
        )
        .unwrap();
        assert_eq!(param_tokens(&registry), vec!["aa", "[bb", "[cc]]"]);

        let registry =
            Registry::build(CommandSpec::new("tool").with_params(&["aa", "bb"], 2), []).unwrap();
        assert_eq!(param_tokens(&registry), vec!["aa", "bb"]);

        let registry =
            Registry::build(CommandSpec::new("tool").with_params(&["aa", "bb"], 0), []).unwrap();
        assert_eq!(param_tokens(&registry), vec!["[aa", "[bb]]"]);
    }

    #[test]
    fn test_chunk_by_characters() {
        assert_eq!(chunk("abcdefg", 3), vec!["abc", "def", "g"]);
        assert!(chunk("", 3).is_empty());
        assert_eq!(chunk("äöü", 2), vec!["äö", "ü"]);
    }

    #[test]
    fn test_usage_wraps_long_lines() {
        let options: Vec<OptionSpec> = (0..8)
            .map(|i| OptionSpec::value(&format!("option{i}"), ValueType::String))
            .collect();
        let registry = Registry::build(CommandSpec::new("tool"), options).unwrap();

        let usage = usage_text(&registry);
        let lines: Vec<&str> = usage.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Usage:",
                "  tool [--option0 <string>] [--option1 <string>] [--option2 <string>] [--option3 <string>]",
                "       [--option4 <string>] [--option5 <string>] [--option6 <string>] [--option7 <string>]",
                "  tool --help",
            ]
        );
    }

    #[test]
    fn test_help_chunk_keeps_trailing_spaces() {
        let registry = Registry::build(
            CommandSpec::new("tool"),
            [OptionSpec::flag("pad").with_help("padded  ")],
        )
        .unwrap();

        let table = option_table(&registry);
        assert!(table.contains("  --pad         : padded  \n"), "{table:?}");
    }

    #[test]
    fn test_option_row_alignment() {
        let registry = Registry::build(
            CommandSpec::new("tool"),
            [OptionSpec::value("count", ValueType::Number)
                .with_alias('c')
                .with_help("How many")],
        )
        .unwrap();

        let table = option_table(&registry);
        assert_eq!(
            table,
            "  -c, --count <number>    : How many\n  -h, --help              : print this help message and exit\n"
        );
    }

    #[test]
    fn test_long_help_continues_under_separator() {
        let help = "x".repeat(70);
        let registry = Registry::build(
            CommandSpec::new("tool"),
            [OptionSpec::flag("long").with_help(&help)],
        )
        .unwrap();

        let table = option_table(&registry);
        let lines: Vec<&str> = table.lines().collect();
        // "-h, --help" is the widest spec (10): padded to 12, `:` at column 16.
        assert_eq!(lines[1], format!("  --long        : {}", "x".repeat(58)));
        assert_eq!(lines[2], format!("{}{}", " ".repeat(16), "x".repeat(12)));
        assert_eq!(lines[2].find('x'), lines[1].find(':'));
    }
}
