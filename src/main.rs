//! figwire CLI
//!
//! Usage:
//!   figwire [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --check          Validate the drawing and print a summary
//!   -r, --routes         Print each recomputed connection route
//!   -t, --theme <FILE>   Fill in default attributes from a theme (TOML)
//!   -o, --output <FILE>  Write the normalized drawing to a file
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use figwire::{Drawing, Theme};

#[derive(Parser)]
#[command(name = "figwire")]
#[command(about = "Inspect, normalize and re-route drawing files")]
struct Cli {
    /// Input drawing file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Validate the drawing and print a summary instead of emitting it
    #[arg(short, long)]
    check: bool,

    /// Print each recomputed connection route
    #[arg(short, long)]
    routes: bool,

    /// Theme file supplying default attributes (TOML format)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Write the normalized drawing to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let filename = cli
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut drawing = match Drawing::from_str(&source) {
        Ok(drawing) => drawing,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    if let Some(path) = &cli.theme {
        let theme = match Theme::from_file(path) {
            Ok(theme) => theme,
            Err(e) => {
                eprintln!("Error loading theme '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        };
        drawing.apply_theme(&theme);
    }

    if cli.routes {
        for (index, connection) in drawing.connections().iter().enumerate() {
            let points: Vec<String> = connection
                .route()
                .points()
                .iter()
                .map(|p| format!("({}, {})", p.x, p.y))
                .collect();
            println!(
                "connection {} [{} -> {}]: {}",
                index,
                connection.from,
                connection.to,
                points.join(" - ")
            );
        }
        return;
    }

    if cli.check {
        println!(
            "ok: {} figures, {} connections",
            drawing.figures().len(),
            drawing.connections().len()
        );
        return;
    }

    let serialized = drawing.serialize();
    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, serialized) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => {
            print!("{}", serialized);
        }
    }
}

fn print_intro() {
    println!(
        r#"figwire - inspect, normalize and re-route drawing files

USAGE:
    figwire [OPTIONS] [FILE]
    cat drawing.fig | figwire

OPTIONS:
    -c, --check     Validate the drawing and print a summary
    -r, --routes    Print each recomputed connection route
    -t, --theme     Fill in default attributes from a theme (TOML)
    -o, --output    Write the normalized drawing to a file
    -h, --help      Print help

A drawing file starts with a "drawing" marker, followed by its figures
(diamond or triangle, each with an attribute block and a display box) and
the elbow connections between them. Connection routes are recomputed on
load; they are never stored in the file."#
    );
}
