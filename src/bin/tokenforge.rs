//! Command-line interface for tokenforge
//! Runs the token-tree pipeline over a file or an expression and prints the result.
//!
//! Usage:
//!   tokenforge `<path>` [--stage `<stage>`] [--format `<format>`]  - Process a file
//!   tokenforge -e `<expr>` [--stage `<stage>`] [--format `<format>`] - Process an expression
//!   tokenforge `<path>` --records                                 - Read a key/value table as JSON
//!
//! Set `RUST_LOG=tokenforge=debug` to see each pass.

use clap::{Arg, ArgAction, ArgGroup, Command};
use log::info;
use tokenforge::forge::config::{ForgeConfig, Loader};
use tokenforge::forge::records::read_records;
use tokenforge::forge::token::to_treeviz;
use tokenforge::forge::transforms::standard::{pipeline_to_depth, Depth};

fn main() {
    env_logger::init();

    let matches = Command::new("tokenforge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build and inspect token trees")
        .arg(
            Arg::new("path")
                .help("Path to the source file")
                .index(1),
        )
        .arg(
            Arg::new("expr")
                .long("expr")
                .short('e')
                .help("Process this expression instead of a file"),
        )
        .group(
            ArgGroup::new("input")
                .args(["path", "expr"])
                .required(true),
        )
        .arg(
            Arg::new("stage")
                .long("stage")
                .short('s')
                .help("Last pipeline stage to run")
                .value_parser(["tokens", "lexing", "grouping", "full"])
                .default_value("full"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["treeviz", "json", "text"])
                .default_value("treeviz"),
        )
        .arg(
            Arg::new("records")
                .long("records")
                .help("Read the input as a key/value table and print it as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .get_matches();

    let source = match (
        matches.get_one::<String>("path"),
        matches.get_one::<String>("expr"),
    ) {
        (_, Some(expr)) => expr.clone(),
        (Some(path), None) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }),
        (None, None) => unreachable!("clap requires an input"),
    };

    if matches.get_flag("records") {
        handle_records(&source);
        return;
    }

    let config = load_config(matches.get_one::<String>("config"));
    let stage = matches
        .get_one::<String>("stage")
        .map(String::as_str)
        .unwrap_or("full");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("treeviz");
    handle_pipeline(source, stage, format, &config);
}

fn load_config(path: Option<&String>) -> ForgeConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

fn handle_records(source: &str) {
    let records = read_records(source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    match serde_json::to_string_pretty(&records) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_pipeline(source: String, stage: &str, format: &str, config: &ForgeConfig) {
    let depth = match stage {
        "tokens" => Depth::Tokens,
        "lexing" => Depth::Lexing,
        "grouping" => Depth::Grouping,
        _ => Depth::Full,
    };
    let pipeline = pipeline_to_depth(config, depth);
    info!("running stage '{}' over {} byte(s)", stage, source.len());

    let root = pipeline.run(source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match format {
        "json" => match serde_json::to_string_pretty(&root) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        "text" => {
            for token in root.children() {
                println!("{:?} {:?}", token.kind(), token.text());
            }
        }
        _ => print!("{}", to_treeviz(&root)),
    }
}
