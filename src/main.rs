//! CLI tool to evaluate and check shell-style parameter expansions.

use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shellvars_rs::{
    Absent, Options, Syntax, Variables, ast, evaluate_with, parse_env_file, parse_with, substitute,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shellvars")]
#[command(about = "Evaluate shell-style ${NAME:-default} expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// How to treat variables that are not defined: empty or skip
    #[arg(long, env = "SHELLVARS_ABSENT", default_value = "empty", global = true)]
    absent: Absent,

    /// Reject malformed `${` instead of keeping it as text
    #[arg(long, global = true)]
    strict: bool,

    /// Seed variables from the process environment
    #[arg(long, global = true)]
    env: bool,

    /// Load variables from a NAME=VALUE file (repeatable)
    #[arg(long = "env-file", value_name = "PATH", global = true)]
    env_files: Vec<String>,

    /// Set a variable (repeatable, applied last)
    #[arg(short, long = "set", value_name = "NAME=VALUE", global = true)]
    set: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate expressions in order, carrying assignments forward
    Eval {
        #[arg(required = true)]
        expressions: Vec<String>,

        /// Print one JSON object per expression
        #[arg(long)]
        json: bool,
    },
    /// Evaluate whole files and print the result
    Render {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Check that files parse with strict syntax
    Check {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Substitute plain $NAME references only
    Subst {
        #[arg(required = true)]
        expressions: Vec<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let absent = cli.absent;
    let options = Options {
        absent,
        syntax: if cli.strict {
            Syntax::Strict
        } else {
            Syntax::Lenient
        },
    };

    let Some(mut variables) = load_variables(&cli) else {
        return ExitCode::from(2);
    };
    tracing::debug!(count = variables.len(), %absent, "variables loaded");

    let had_error = match &cli.command {
        Command::Eval { expressions, json } => {
            run_eval(expressions, &mut variables, options, *json)
        }
        Command::Render { files } => run_render(files, &variables, options),
        Command::Check { files } => run_check(files),
        Command::Subst { expressions } => {
            for expr in expressions {
                println!("{}", substitute(expr, &variables, absent));
            }
            false
        }
    };

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Collect variables: process env, then env files, then `--set`.
fn load_variables(cli: &Cli) -> Option<Variables> {
    let mut variables = Variables::new();

    if cli.env {
        variables.extend(std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        }));
    }

    for path in &cli.env_files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                return None;
            }
        };
        match parse_env_file(&content) {
            Ok(vars) => {
                tracing::debug!(%path, count = vars.len(), "env file loaded");
                variables.extend(vars);
            }
            Err(e) => {
                eprintln!("{path}: {e}");
                return None;
            }
        }
    }

    for pair in &cli.set {
        let Some((name, value)) = pair.split_once('=') else {
            eprintln!("Error: --set expects NAME=VALUE, got '{pair}'");
            return None;
        };
        if !shellvars_rs::is_name(name) {
            eprintln!("Error: invalid variable name '{name}'");
            return None;
        }
        variables.insert(name.to_string(), value.to_string());
    }

    Some(variables)
}

fn run_eval(
    expressions: &[String],
    variables: &mut Variables,
    options: Options,
    json: bool,
) -> bool {
    for expr in expressions {
        tracing::debug!(%expr, "evaluating");
        match evaluate_with(expr, variables, options) {
            Ok(out) => {
                if json {
                    match serde_json::to_string(&out) {
                        Ok(line) => println!("{line}"),
                        Err(e) => {
                            eprintln!("Error: {e}");
                            return true;
                        }
                    }
                } else {
                    println!("{}", out.value);
                }
                variables.extend(out.assignments);
            }
            Err(e) => {
                tracing::warn!(%expr, "evaluation failed");
                eprintln!("Error: {e}");
                return true;
            }
        }
    }
    false
}

fn run_render(files: &[String], variables: &Variables, options: Options) -> bool {
    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match evaluate_with(&content, variables, options) {
            Ok(out) => {
                tracing::debug!(%path, assigned = out.assignments.len(), "rendered");
                print!("{}", out.value);
            }
            Err(e) => {
                tracing::warn!(%path, "render failed");
                eprintln!("{path}: {e}");
                had_error = true;
            }
        }
    }

    had_error
}

fn run_check(files: &[String]) -> bool {
    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match parse_with(&content, Syntax::Strict) {
            Ok(nodes) => {
                let count = ast::count_expansions(&nodes);
                eprintln!("{path}: ok ({count} expansion(s))");
            }
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
            }
        }
    }

    had_error
}
