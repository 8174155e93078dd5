pub mod color;
pub mod config;
pub mod parse;
pub mod plugins;
pub mod segment;
pub mod theme;
pub mod value;
pub mod variant;

pub use crate::config::Config;
pub use crate::parse::{parse, parse_with, Ast, AstKind, ParseError, State};
pub use crate::plugins::{FunctionalPlugin, NamedPlugin, PluginRegistry, ValueKind};
pub use crate::theme::{Scale, ScaleEntry, Theme};
pub use crate::value::Value;
pub use crate::variant::{Variant, VariantKind};

use std::env;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Parse {
        tokens: Vec<String>,
        config: Option<String>,
        json: bool,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    pub message: String,
}

pub fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Parse {
            tokens,
            config,
            json,
        } => run_parse(tokens, config, json),
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

pub fn run_from_env() -> Result<(), CliError> {
    let command = parse_args(env::args().skip(1))?;
    run(command)
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut iter = args.into_iter();
    let Some(cmd) = iter.next() else {
        return Ok(Command::Help);
    };

    match cmd.as_str() {
        "parse" => parse_parse_args(iter.collect()),
        "-h" | "--help" | "help" => Ok(Command::Help),
        _ => Err(CliError {
            message: format!("unknown command: {}", cmd),
        }),
    }
}

fn parse_parse_args(args: Vec<String>) -> Result<Command, CliError> {
    let mut tokens = Vec::new();
    let mut config = None;
    let mut json = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let Some(path) = iter.next() else {
                    return Err(CliError {
                        message: format!("{} requires a path", arg),
                    });
                };
                config = Some(path);
            }
            "--json" => json = true,
            // Tokens may start with a single '-' (negative utilities), so
            // only double-dash arguments are treated as flags here.
            _ if arg.starts_with("--") => {
                return Err(CliError {
                    message: format!("unknown flag: {}", arg),
                });
            }
            _ => tokens.push(arg),
        }
    }

    if tokens.is_empty() {
        return Err(CliError {
            message: "parse requires at least one utility class token".to_string(),
        });
    }

    Ok(Command::Parse {
        tokens,
        config,
        json,
    })
}

fn run_parse(tokens: Vec<String>, config: Option<String>, json: bool) -> Result<(), CliError> {
    let config = match config {
        Some(path) => Some(config::load(Path::new(&path)).map_err(|err| CliError {
            message: err.message,
        })?),
        None => None,
    };

    // Parse failures are data, not process failures: a bad token is
    // reported and the batch keeps going.
    for token in &tokens {
        match parse(token, config.as_ref()) {
            Ok(ast) => print_ast(token, &ast, json),
            Err(err) => print_error(token, &err, json),
        }
    }
    Ok(())
}

fn print_ast(token: &str, ast: &Ast, json: bool) {
    if json {
        match serde_json::to_string(ast) {
            Ok(line) => println!("{}", line),
            Err(err) => eprintln!("{}: failed to serialize: {}", token, err),
        }
        return;
    }
    let kind = match ast.kind {
        AstKind::Named => "named",
        AstKind::Functional => "functional",
    };
    let mut line = format!("{}: {} {} = {}", token, kind, ast.property, ast.value);
    if let Some(modifier) = &ast.modifier {
        line.push_str(&format!(" / {}", modifier));
    }
    if !ast.variants.is_empty() {
        let names = ast
            .variants
            .iter()
            .map(|variant| variant.raw.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        line.push_str(&format!(" [variants: {}]", names));
    }
    println!("{}", line);
}

fn print_error(token: &str, err: &ParseError, json: bool) {
    if json {
        let line = serde_json::json!({
            "root": err.root,
            "kind": "error",
            "message": err.message,
        });
        println!("{}", line);
        return;
    }
    println!("{}: error: {}", token, err.message);
}

fn print_help() {
    println!("ironparse - utility class token parser");
    println!();
    println!("Usage:");
    println!("  ironparse parse [options] <token>...");
    println!();
    println!("Options:");
    println!("  -c, --config <path>   TOML theme overrides");
    println!("  --json                one JSON object per token");
    println!();
    println!("Examples:");
    println!("  ironparse parse hover:-mt-[2px] bg-red-500/50");
    println!("  ironparse parse -c theme.toml --json md:text-sm");
}

#[cfg(test)]
mod tests {
    use super::{parse_args, run, Command};

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| (*part).to_string()).collect()
    }

    #[test]
    fn no_args_means_help() {
        assert_eq!(parse_args(args(&[])), Ok(Command::Help));
        assert_eq!(parse_args(args(&["--help"])), Ok(Command::Help));
    }

    #[test]
    fn parse_collects_tokens_and_flags() {
        let command = parse_args(args(&[
            "parse",
            "-c",
            "theme.toml",
            "--json",
            "mt-4",
            "bg-red-500/50",
        ]))
        .expect("args should parse");
        assert_eq!(
            command,
            Command::Parse {
                tokens: vec!["mt-4".to_string(), "bg-red-500/50".to_string()],
                config: Some("theme.toml".to_string()),
                json: true,
            }
        );
    }

    #[test]
    fn negative_tokens_are_not_flags() {
        let command = parse_args(args(&["parse", "-mt-4"])).expect("args should parse");
        assert_eq!(
            command,
            Command::Parse {
                tokens: vec!["-mt-4".to_string()],
                config: None,
                json: false,
            }
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse_args(args(&["build"])).expect_err("build is not a command");
        assert!(err.message.contains("unknown command"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parse_args(args(&["parse", "--minify", "mt-4"])).expect_err("not a flag");
        assert!(err.message.contains("unknown flag"));
    }

    #[test]
    fn parse_requires_tokens() {
        let err = parse_args(args(&["parse", "--json"])).expect_err("no tokens given");
        assert!(err.message.contains("at least one"));
    }

    #[test]
    fn config_flag_requires_path() {
        let err = parse_args(args(&["parse", "mt-4", "-c"])).expect_err("missing path");
        assert!(err.message.contains("requires a path"));
    }

    #[test]
    fn run_reports_missing_config_file() {
        let command = Command::Parse {
            tokens: vec!["mt-4".to_string()],
            config: Some("/nonexistent/ironparse.toml".to_string()),
            json: false,
        };
        let err = run(command).expect_err("missing config file should fail");
        assert!(err.message.contains("failed to read config"));
    }

    #[test]
    fn run_survives_bad_tokens() {
        let command = Command::Parse {
            tokens: vec!["nope-nope".to_string(), "mt-4".to_string()],
            config: None,
            json: true,
        };
        run(command).expect("parse errors are not CLI errors");
    }
}
