//! Spec file example.
//!
//! Loads a command spec from YAML, then shows each kind of parse outcome for
//! a few fixed argument lists: a result, help, version and a usage error.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p optspec-demos --example spec_from_yaml
//! ```

use optspec_core::SpecFile;
use optspec_parser::Parser;

const SPEC: &str = r#"
command:
  name: archive
  version: "0.4.2"
  params: [source, target]
  params_required: 1
  summary: Pack a directory into an archive
options:
  - name: level
    alias: l
    type: number
    default: 6
    help: Compression level
  - name: format
    alias: f
    required: true
    help: Archive format (tar, zip)
  - name: dry-run
    alias: n
    is_flag: true
    help: Show what would be packed
    description: |
      Nothing is written.
      The file list is printed instead.
"#;

fn main() {
    let registry = SpecFile::from_yaml_str(SPEC)
        .and_then(SpecFile::into_registry)
        .expect("archive spec is valid");
    let parser = Parser::new(&registry);

    let runs: &[&[&str]] = &[
        &["-f", "tar", "photos"],
        &["--format", "zip", "-l", "9", "-n", "photos", "photos.zip"],
        &["--version"],
        &["--help"],
        &["photos"],
        &["-f", "tar", "-l", "max", "photos"],
    ];

    for args in runs {
        println!("$ archive {}", args.join(" "));
        match parser.parse(*args) {
            Ok(parsed) => {
                for (name, value) in parsed.options() {
                    println!("  {name} = {value}");
                }
                for (idx, param) in parsed.params().iter().enumerate() {
                    println!("  param[{idx}] = {param}");
                }
            }
            Err(outcome) => {
                print!("{}", outcome.text());
                println!("  (exit status {})", outcome.exit_code());
            }
        }
        println!();
    }
}
