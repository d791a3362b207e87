//! fieldx command-line tool: extract fields from every line of a log.
//!
//! Usage: fieldx [OPTIONS] [FILE]
//!
//! Each non-blank input line becomes a row `{ <source>: <line> }` (or, with
//! `--rows`, the line is itself a JSON object row). The chosen extractor runs
//! on the row's source field and the resulting rows are written out.

use clap::{Parser, ValueEnum};
use libfieldx::{
    encode, extract_row, parse_json_object, ExtractOptions, Fields, Format, Registry,
};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod transcode;

/// Environment variable holding a tracing filter, e.g. `libfieldx=debug`.
const LOG_ENV: &str = "FIELDX_LOG";

#[derive(Parser, Debug)]
#[command(name = "fieldx", author, version, about = "Extract fields from log lines", long_about = None)]
struct Cli {
    /// Input file (reads stdin if not provided or "-")
    input: Option<PathBuf>,

    /// Extractor: json, kvp, or auto
    #[arg(short, long, default_value = "auto")]
    format: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    to: OutputFormat,

    /// Field holding the text to extract from
    #[arg(short, long, default_value = "line")]
    source: String,

    /// Input lines are JSON object rows
    #[arg(long)]
    rows: bool,

    /// Keep only the extracted fields
    #[arg(long)]
    replace: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the available extractors and exit
    #[arg(long)]
    list: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One JSON object per line
    Json,
    /// One line of key=value pairs per row
    Kvp,
    /// A YAML sequence of rows
    Yaml,
    /// A TOML array of tables named "rows"
    Toml,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32, String> {
    let registry = Registry::standard();

    if cli.list {
        for extractor in registry.list() {
            println!(
                "{}\t{}\t{}",
                extractor.id, extractor.name, extractor.description
            );
        }
        return Ok(0);
    }

    registry
        .require(&cli.format)
        .map_err(|e| format!("Error: {}", e))?;

    let options = ExtractOptions {
        source: cli.source.clone(),
        format: cli.format.clone(),
        replace: cli.replace,
    };
    debug!(?options, to = ?cli.to, "options");

    let reader = open_input(cli.input.as_deref())?;
    let mut rows = Vec::new();
    let mut had_errors = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error reading input: {}", e))?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }
        match make_row(line, cli) {
            Ok(row) => rows.push(extract_row(&row, &options, &registry)),
            Err(e) => {
                eprintln!("line {}: {}", index + 1, e);
                had_errors = true;
            }
        }
    }
    info!(rows = rows.len(), "extracted");

    let output = render(&rows, cli.to)?;
    write_output(&output, cli.output.as_deref())?;

    Ok(if had_errors { 1 } else { 0 })
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, String> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Build the row for one input line.
fn make_row(line: &str, cli: &Cli) -> Result<Fields, String> {
    if !cli.rows {
        let mut row = Fields::new();
        row.insert(cli.source.clone(), Value::String(line.to_string()));
        return Ok(row);
    }
    match parse_json_object(line) {
        Ok(Some(row)) => Ok(row),
        Ok(None) => Err("Expected a JSON object, found null".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn render(rows: &[Fields], to: OutputFormat) -> Result<String, String> {
    match to {
        OutputFormat::Json => Ok(render_lines(rows, Format::Json)),
        OutputFormat::Kvp => Ok(render_lines(rows, Format::Kvp)),
        OutputFormat::Yaml => transcode::yaml::encode_rows(rows)
            .map_err(|e| format!("Error: Cannot convert to YAML: {}", e)),
        OutputFormat::Toml => transcode::toml::encode_rows(rows)
            .map_err(|e| format!("Error: Cannot convert to TOML: {}", e)),
    }
}

fn render_lines(rows: &[Fields], format: Format) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&encode(row, format));
        out.push('\n');
    }
    out
}

fn write_output(output: &str, output_file: Option<&Path>) -> Result<(), String> {
    match output_file {
        Some(path) => fs::write(path, output)
            .map_err(|e| format!("Error writing {}: {}", path.display(), e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| format!("Error writing to stdout: {}", e))
        }
    }
}
