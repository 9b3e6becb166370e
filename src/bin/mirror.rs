//! Command-line interface for mirror
//! This binary tokenizes, parses, and compiles Mirror specification files.
//!
//! Usage:
//!   mirror tokens `<path>` [--format `<simple|json>`]   - Dump the token stream
//!   mirror parse `<path>` [--format `<simple|json>`] [--grouped]
//!                                                    - Parse (and optionally group) a file
//!   mirror models [--endpoint `<url>`]                 - List models of the local service
//!   mirror compile `<path>` [--model `<name>`] [--endpoint `<url>`]
//!                                                    - Generate code for a file

use clap::{Arg, ArgAction, Command};

use mirror::mirror::compiler::{
    compile, LocalServiceClient, DEFAULT_COMPILE_MODEL, DEFAULT_ENDPOINT,
};
use mirror::mirror::processor::{process_source, ProcessingSpec};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = Command::new("mirror")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A compiler front-end for the Mirror specification language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Dump the token stream of a Mirror file")
                .arg(
                    Arg::new("path")
                        .help("Path to the Mirror file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('simple' or 'json')")
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a Mirror file and print its AST")
                .arg(
                    Arg::new("path")
                        .help("Path to the Mirror file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('simple' or 'json')")
                        .default_value("json"),
                )
                .arg(
                    Arg::new("grouped")
                        .long("grouped")
                        .help("Group examples with their signatures")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("models")
                .about("List the models the local generation service offers")
                .arg(
                    Arg::new("endpoint")
                        .long("endpoint")
                        .help("Base URL of the generation service")
                        .default_value(DEFAULT_ENDPOINT),
                ),
        )
        .subcommand(
            Command::new("compile")
                .about("Generate code for a Mirror file via the local service")
                .arg(
                    Arg::new("path")
                        .help("Path to the Mirror file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .short('m')
                        .help("Model name to request")
                        .default_value(DEFAULT_COMPILE_MODEL),
                )
                .arg(
                    Arg::new("endpoint")
                        .long("endpoint")
                        .help("Base URL of the generation service")
                        .default_value(DEFAULT_ENDPOINT),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_process_command(path, &format!("tokens-{}", format));
        }
        Some(("parse", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            let stage = if sub.get_flag("grouped") { "grouped" } else { "ast" };
            handle_process_command(path, &format!("{}-{}", stage, format));
        }
        Some(("models", sub)) => {
            let endpoint = sub.get_one::<String>("endpoint").unwrap();
            handle_models_command(endpoint).await;
        }
        Some(("compile", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let model = sub.get_one::<String>("model").unwrap();
            let endpoint = sub.get_one::<String>("endpoint").unwrap();
            handle_compile_command(path, model, endpoint).await;
        }
        _ => unreachable!(),
    }
}

/// Read a source file or exit with a message
fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Handle the tokens and parse commands
fn handle_process_command(path: &str, format: &str) {
    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let source = read_source(path);

    match process_source(&source, &spec) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the models command
async fn handle_models_command(endpoint: &str) {
    let client = LocalServiceClient::with_endpoint(endpoint);
    match client.available_models().await {
        Ok(models) => {
            for model in models {
                println!("{}", model);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the compile command
async fn handle_compile_command(path: &str, model: &str, endpoint: &str) {
    let source = read_source(path);
    let client = LocalServiceClient::with_endpoint(endpoint).with_model(model);

    match compile(&source, &client).await {
        Ok(generated) => println!("{}", generated),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
