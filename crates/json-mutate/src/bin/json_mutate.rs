//! `json-mutate`: apply a list of mutation actions to a JSON document.
//!
//! Usage:
//!   json-mutate <config.json> [context.json]
//!
//! The document is read from stdin and the result written to stdout. The
//! config file holds `{"actions": [...]}`; the optional context file is the
//! JSON value that `when` conditions are evaluated against. Set `RUST_LOG`
//! to see per-action logging on stderr.

use json_mutate::cli::run_files;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(p) => p.as_str(),
        None => {
            eprintln!("Usage: json-mutate <config.json> [context.json]");
            std::process::exit(1);
        }
    };

    match run_files(config, args.get(2).map(String::as_str), io::stdin().lock()) {
        Ok(output) => {
            let mut stdout = io::stdout();
            if let Err(e) = stdout.write_all(&output).and_then(|_| stdout.write_all(b"\n")) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
