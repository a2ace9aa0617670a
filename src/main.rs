use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use fa_reader::fa::domain::representation::DEFAULT_PROBE_FIELD;
use fa_reader::fa::patch::{FRAME_FIX_FIELD, FRAME_FIX_VALUE, FRAME_FIX_WORD};
use fa_reader::{Access, FaError, FaFile, FieldCatalog, ReadOnly, ReadWrite};
use regex::Regex;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Basic FA file utilities combined in one call
#[derive(Parser)]
#[command(name = "fatool")]
struct Cli {
    /// Path to the FA file
    fafile: Option<PathBuf>,

    /// Production (creation / last modification) date and time
    #[arg(short = 'p')]
    production: bool,

    /// List fields
    #[arg(short = 'l')]
    list: bool,

    /// Only list fields matching this pattern (repeatable)
    #[arg(short = 'm', long = "match", value_name = "REGEX", requires = "list")]
    templates: Vec<String>,

    /// Check the file size against the header
    #[arg(short = 's')]
    size: bool,

    /// FA header
    #[arg(short = 'H')]
    header: bool,

    /// Fix the frame parameter in recent global LBC files
    #[arg(short = 'F')]
    fix_frame: bool,

    /// Check whether a field is spectral or grid point
    #[arg(short = 'q')]
    probe: bool,

    /// Field probed by -q
    #[arg(long, env = "FATOOL_FIELD", default_value = DEFAULT_PROBE_FIELD)]
    field: String,

    /// Forecast date and lead time
    #[arg(short = 'd')]
    date: bool,

    /// Model domain
    #[arg(short = 'D')]
    domain: bool,

    /// Version
    #[arg(short = 'v')]
    show_version: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.show_version {
        println!("fatool version: {}", VERSION);
        return ExitCode::SUCCESS;
    }

    let Some(path) = cli.fafile.clone() else {
        eprintln!("ERROR: no file name given.");
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::SUCCESS;
    };
    if !path.exists() {
        eprintln!("ERROR: file {} not found.", path.display());
        return ExitCode::FAILURE;
    }

    if cli.fix_frame {
        run::<ReadWrite>(&cli, &path)
    } else {
        run::<ReadOnly>(&cli, &path)
    }
}

fn run<A: Access>(cli: &Cli, path: &Path) -> ExitCode {
    let mut fa = match FaFile::<A>::open(path) {
        Ok(fa) => fa,
        Err(e) => return fatal(&e),
    };

    if cli.header {
        println!("{:#?}", fa.header());
    }

    if cli.production {
        let header = fa.header();
        println!("Creation: {}", header.created);
        println!("Last mod: {}", header.last_modified);
    }

    if cli.size {
        let expected = fa.header().expected_file_size();
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() == expected => println!("OK : size {}", meta.len()),
            Ok(meta) => {
                println!("ERROR : expected {}, actual size {}.", expected, meta.len());
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if !(cli.list || cli.date || cli.probe || cli.fix_frame || cli.domain) {
        return ExitCode::SUCCESS;
    }

    // One catalog for every query of this invocation.
    let catalog = match fa.catalog() {
        Ok(catalog) => catalog,
        Err(e) if e.is_format_error() => return fatal(&e),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::SUCCESS;
        }
    };
    if let Some(warning) = catalog.warning() {
        println!("ERROR: {}", warning);
    }

    if cli.list {
        match compile_templates(&cli.templates) {
            Ok(templates) => list_fields(&catalog, &templates),
            Err(e) => eprintln!("ERROR: invalid pattern: {}", e),
        }
    }

    if cli.date {
        match fa.forecast_time(Some(&catalog)) {
            Ok(forecast) => println!("{}", forecast),
            Err(e) => eprintln!("ERROR: {}", e),
        }
    }

    if cli.probe {
        match fa.representation(&cli.field, Some(&catalog)) {
            Ok(kind) => println!("{}", kind),
            Err(e) if e.is_not_found() => println!("Field {} not found.", cli.field),
            Err(e) => eprintln!("ERROR: {}", e),
        }
    }

    if cli.fix_frame {
        match fa.patch_scalar(FRAME_FIX_FIELD, FRAME_FIX_WORD, FRAME_FIX_VALUE, Some(&catalog)) {
            Ok(outcome) => {
                println!("old_value: {}", outcome.old_value);
                println!("new_value: {}", outcome.new_value);
            }
            Err(e) => eprintln!("ERROR: {}", e),
        }
    }

    if cli.domain {
        match fa.domain(Some(&catalog)) {
            Ok(domain) => println!("{}", domain),
            Err(e) => eprintln!("ERROR: {}", e),
        }
    }

    ExitCode::SUCCESS
}

fn fatal(e: &FaError) -> ExitCode {
    match e {
        FaError::NotAnFaFile { .. } => eprintln!("ERROR: not a regular FA file."),
        _ => eprintln!("ERROR: {}", e),
    }
    ExitCode::FAILURE
}

fn compile_templates(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}

fn list_fields(catalog: &FieldCatalog, templates: &[Regex]) {
    const COLUMNS: usize = 3;
    let names: Vec<&str> = if templates.is_empty() {
        catalog.fields().iter().map(|f| f.name.as_str()).collect()
    } else {
        catalog.matching(templates).into_iter().map(|f| f.name.as_str()).collect()
    };
    for (row, chunk) in names.chunks(COLUMNS).enumerate() {
        let line: Vec<String> = chunk.iter().map(|n| format!("{:<16}", n)).collect();
        println!("{:4} : {}", row * COLUMNS + 1, line.join("  ").trim_end());
    }
}
