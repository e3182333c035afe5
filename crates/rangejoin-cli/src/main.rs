//! `rangejoin`: run a JSON join request and print the joined grid as JSON.

mod config;

use std::env;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use rangejoin::JoinRequest;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Environment variable overriding the configured log filter.
const LOG_ENV: &str = "RANGEJOIN_LOG";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    pretty: bool,
    /// `None` or `-` reads stdin.
    request: Option<PathBuf>,
}

#[derive(Debug)]
enum Failure {
    Help,
    Usage(String),
    Run(String),
}

fn print_help() {
    let help = "\
rangejoin: SQL-style INNER/LEFT join over two JSON grids

USAGE:
    rangejoin [OPTIONS] [REQUEST_FILE]

Reads a join request from REQUEST_FILE (stdin when omitted or `-`) and
prints the joined grid as JSON, or `null` for an empty request.

OPTIONS:
    --config <PATH>    TOML file with default_join_type, default_has_header,
                       log_level and pretty
    --pretty           Pretty-print the output
    -h, --help         Show this help

ENVIRONMENT:
    RANGEJOIN_LOG      Log filter (overrides log_level), e.g. `debug`
";
    println!("{help}");
}

fn parse_args(args: &[String]) -> Result<CliArgs, Failure> {
    let mut parsed = CliArgs::default();

    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--config" => {
                index += 1;
                if index >= args.len() {
                    return Err(Failure::Usage("--config requires a value".to_owned()));
                }
                parsed.config = Some(PathBuf::from(&args[index]));
            }
            "--pretty" => parsed.pretty = true,
            "-h" | "--help" => return Err(Failure::Help),
            flag if flag.starts_with("--") => {
                return Err(Failure::Usage(format!("unknown option: {flag}")));
            }
            path => {
                if parsed.request.is_some() {
                    return Err(Failure::Usage(format!("unexpected argument: {path}")));
                }
                parsed.request = Some(PathBuf::from(path));
            }
        }
        index += 1;
    }

    Ok(parsed)
}

fn init_logging(config: &CliConfig) {
    let filter = env::var(LOG_ENV)
        .map_or_else(|_| EnvFilter::new(config.log_level()), EnvFilter::new);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn read_request(path: Option<&PathBuf>) -> Result<String, String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .map_err(|error| format!("cannot read request {}: {error}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|error| format!("cannot read request from stdin: {error}"))?;
            Ok(text)
        }
    }
}

fn run(args: &[String], out: &mut impl Write) -> Result<(), Failure> {
    let args = parse_args(args)?;
    let config = match &args.config {
        Some(path) => CliConfig::load(path).map_err(Failure::Run)?,
        None => CliConfig::default(),
    };
    init_logging(&config);

    let text = read_request(args.request.as_ref()).map_err(Failure::Run)?;
    let mut request =
        JoinRequest::from_json(&text).map_err(|error| Failure::Run(error.to_string()))?;
    config.apply(&mut request);

    let output = request
        .execute()
        .map_err(|error| Failure::Run(error.to_string()))?;
    debug!(rows = output.as_ref().map_or(0, |range| range.height()), "join finished");

    let payload = if args.pretty || config.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(|error| Failure::Run(format!("cannot serialize output: {error}")))?;
    writeln!(out, "{payload}")
        .map_err(|error| Failure::Run(format!("cannot write output: {error}")))
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let outcome = run(&args, &mut std::io::stdout().lock());
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Help) => {
            print_help();
            ExitCode::SUCCESS
        }
        Err(Failure::Usage(message)) => {
            eprintln!("ERROR {message}");
            eprintln!("run `rangejoin --help` for usage");
            ExitCode::from(2)
        }
        Err(Failure::Run(message)) => {
            eprintln!("ERROR rangejoin failed: {message}");
            ExitCode::FAILURE
        }
    }
}
