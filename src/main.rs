//! CMDB graph CLI
//!
//! Usage:
//!   cmdb-graph [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --options <FILE>  Render options (TOML format)
//!   -d, --diagnostics     Report dropped edges and malformed schema text
//!   -v, --verbose         Increase log verbosity (repeatable)
//!   -h, --help            Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use cmdb_graph::{render_document, InputDocument, RenderOptions};

#[derive(Parser)]
#[command(name = "cmdb-graph")]
#[command(about = "Render CMDB views as Graphviz DOT")]
struct Cli {
    /// Input document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Render options file (TOML format), overrides the document's options
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Report dropped edges and malformed schema text on stderr
    #[arg(short, long)]
    diagnostics: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // If no input file and stdin is a terminal (interactive), show usage
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let options = match &cli.options {
        Some(path) => match RenderOptions::from_file(path) {
            Ok(o) => Some(o),
            Err(e) => {
                eprintln!("Error loading options '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let document = match InputDocument::from_json(&source) {
        Ok(doc) => doc,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    let options = if cli.diagnostics {
        let base = options
            .or_else(|| document.options.clone())
            .unwrap_or_default();
        Some(base.with_diagnostics(true))
    } else {
        options
    };

    match render_document(&document, options.as_ref()) {
        Ok((dot, diagnostics)) => {
            for d in &diagnostics {
                eprintln!("warning: {}", d);
            }
            println!("{}", dot);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"cmdb-graph - Render CMDB views as Graphviz DOT

USAGE:
    cmdb-graph [OPTIONS] [FILE]
    cat view.json | cmdb-graph | dot -Tsvg > view.svg

OPTIONS:
    -o, --options      Render options (TOML file)
    -d, --diagnostics  Report dropped edges and malformed schema text
    -v, --verbose      Increase log verbosity
    -h, --help         Print help

INPUT:
    {{
      "query":   {{ "view_graph_type": "subgraph", "graph_dir": "TB",
                   "root_data": {{ "graph_type": "subgraph", "children": [...] }} }},
      "records": [ {{ "guid": "...", ... }} ],
      "options": {{ "suport_version": "yes", "image_map": {{ ... }} }}
    }}"#
    );
}
