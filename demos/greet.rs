//! Declarative greeting command.
//!
//! Builds a registry in code, parses the process arguments and prints a
//! greeting. Help, version and usage errors are printed and end the process.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p optspec-demos --example greet -- --times 2 -s world
//! cargo run -p optspec-demos --example greet -- --help
//! ```

use optspec_core::{CommandSpec, OptionSpec, Registry, ValueType};
use optspec_parser::Parser;

fn main() {
    let registry = Registry::build(
        CommandSpec::new("greet")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_params(&["who", "greeting"], 1)
            .with_summary("Print a greeting"),
        [
            OptionSpec::value("times", ValueType::Number)
                .with_alias('t')
                .with_default(1.0)
                .with_help("Number of repetitions"),
            OptionSpec::flag("shout")
                .with_alias('s')
                .with_help("Print in upper case"),
        ],
    )
    .expect("greet spec is valid");

    let args = Parser::new(&registry).parse_or_exit(std::env::args().skip(1));

    let who = args.param(0).unwrap_or_default();
    let greeting = args.param(1).unwrap_or("Hello");
    let mut line = format!("{greeting}, {who}!");
    if args.flag("shout") {
        line = line.to_uppercase();
    }

    let times = args.get_number("times").unwrap_or(1.0).max(0.0) as usize;
    for _ in 0..times {
        println!("{line}");
    }
}
