//! Command-line interface for asi
//! This binary reports where automatic semicolons would be inserted in a source file.
//!
//! Usage:
//!   asi probe `<path>` [--format `<format>`] [--sites `<mode>`] [--config `<file>`]
//!             [--range `<a..b>`]...
//!   asi list-formats          - List the available output formats
//!
//! Configuration is layered: built-in defaults, then `asi.toml` in the working directory if
//! present, then `--config`, then flags.

use std::io::Read;
use std::path::PathBuf;

use asi_config::{AsiConfig, Loader, OutputFormat};
use asi_scanner::asi::probe::{parse_included_range, probe, ProbeOptions};
use asi_scanner::asi::ProbeError;
use clap::{Arg, ArgAction, ArgMatches, Command};

fn main() {
    let matches = Command::new("asi")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Report automatic semicolon insertions in a source file")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log scanner activity to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("probe")
                .about("Run the scanner at every candidate site of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (text or json)"),
                )
                .arg(
                    Arg::new("sites")
                        .long("sites")
                        .help("Candidate sites (token-end or line-end)"),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .help("Show the source line under each insertion")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("range")
                        .long("range")
                        .short('r')
                        .help("Included byte range START..END (repeatable)")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("probe", probe_matches)) => {
            if let Err(e) = handle_probe_command(probe_matches) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Layer the project file, the config file and command-line flags over the defaults.
fn load_config(matches: &ArgMatches) -> Result<AsiConfig, ProbeError> {
    let mut loader = Loader::new().with_project_file(".");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(sites) = matches.get_one::<String>("sites") {
        loader = loader.set_override("probe.sites", sites.as_str())?;
    }
    if matches.get_flag("context") {
        loader = loader.set_override("output.show_context", true)?;
    }
    Ok(loader.build()?)
}

fn read_source(path: &str) -> Result<String, ProbeError> {
    let io_error = |source| ProbeError::Io {
        path: PathBuf::from(path),
        source,
    };
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(io_error)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path).map_err(io_error)
    }
}

/// Handle the probe command
fn handle_probe_command(matches: &ArgMatches) -> Result<(), ProbeError> {
    let config = load_config(matches)?;
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let source = read_source(path)?;

    let included_ranges = matches
        .get_many::<String>("range")
        .map(|ranges| {
            ranges
                .map(|r| parse_included_range(r))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let options = ProbeOptions {
        sites: config.probe.sites,
        included_ranges,
    };
    let report = probe(&source, &options);
    log::info!(
        "{}: {} sites checked, {} insertions",
        path,
        report.sites_checked,
        report.insertions.len()
    );

    match config.output.format {
        OutputFormat::Text => print!("{}", report.render_text(&source, config.output.show_context)),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    println!("  text");
    println!("    One `line:column reason` entry per insertion.");
    println!("  json");
    println!("    The full probe report as JSON.");
}
