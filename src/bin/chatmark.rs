//! Command-line interface for chatmark
//! Renders, validates and inspects chatmark sources.
//!
//! Usage:
//!   chatmark render `<path>` [--format `<format>`] [--config `<file>`]  - Render to an output dialect
//!   chatmark validate `<path>` [--config `<file>`]                   - Check text against the strict dialect
//!   chatmark inspect `<path>` [--view `<view>`] [--config `<file>`]  - Show tokens, tree or JSON AST
//!   chatmark list-formats                                        - List output formats
//!
//! A path of `-` reads from standard input. Every command that reads a source applies the
//! configured limits. Logging goes to stderr and is controlled by
//! `RUST_LOG` (default `warn`).

use chatmark::config::Loader;
use chatmark::formats::{Format, View};
use chatmark::pipeline::Pipeline;
use clap::{Arg, ArgMatches, Command};
use std::io::Read;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("chatmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render, validate and inspect chatmark text")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Render a source file to an output format")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: rich, strict or normalized (default from config)"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Check text against the strict dialect rules")
                .arg(path_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the token stream or the parsed tree")
                .arg(path_arg())
                .arg(
                    Arg::new("view")
                        .long("view")
                        .short('v')
                        .help("View: treeviz, json or tokens")
                        .default_value("treeviz"),
                )
                .arg(config_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("render", sub)) => handle_render_command(sub),
        Some(("validate", sub)) => handle_validate_command(sub),
        Some(("inspect", sub)) => handle_inspect_command(sub),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the source file, or - for stdin")
        .required(true)
        .index(1)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file layered over the built-in defaults")
}

/// Pipeline from the built-in defaults plus the `--config` file, if any.
fn load_pipeline(matches: &ArgMatches) -> Pipeline {
    let mut loader = Loader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }
    let config = loader.build().unwrap_or_else(|e| fail(e));
    Pipeline::new(&config)
}

fn path_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-")
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn read_source(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            fail(format!("reading stdin: {}", e));
        }
        return source;
    }
    std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("reading {}: {}", path, e)))
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches) {
    let pipeline = load_pipeline(matches);
    let format = match matches.get_one::<String>("format") {
        Some(name) => name.parse::<Format>().unwrap_or_else(|e| fail(e)),
        None => pipeline.default_format(),
    };

    let source = read_source(path_of(matches));
    let output = pipeline
        .execute(&source, format)
        .unwrap_or_else(|e| fail(e));
    println!("{}", output);
}

/// Handle the validate command
fn handle_validate_command(matches: &ArgMatches) {
    let pipeline = load_pipeline(matches);
    let source = read_source(path_of(matches));
    let errors = pipeline.validate(&source).unwrap_or_else(|e| fail(e));
    if errors.is_empty() {
        println!("ok");
        return;
    }
    for error in &errors {
        println!("{}: {}", error.position(), error.message());
    }
    process::exit(1);
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) {
    let view = matches
        .get_one::<String>("view")
        .map(String::as_str)
        .unwrap_or("treeviz")
        .parse::<View>()
        .unwrap_or_else(|e| fail(e));
    let pipeline = load_pipeline(matches);
    let source = read_source(path_of(matches));
    let output = pipeline
        .inspect(&source, view)
        .unwrap_or_else(|e| fail(e));
    print!("{}", output);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in Format::ALL {
        println!("  {}", format);
        println!("    {}", format.description());
        println!("    aliases: {}", format.aliases().join(", "));
    }
}
