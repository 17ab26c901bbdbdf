use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};

use utils::{init_log, LogLevel};

use crate::config::Config;

/// Set up definition of command options for clap
fn cli_model() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .author(crate_authors!())
        .arg(
            Arg::new("timestamp")
                .short('X')
                .long("timestamp")
                .value_parser(value_parser!(stderrlog::Timestamp))
                .value_name("GRANULARITY")
                .default_value("none")
                .help("Prepend log entries with a timestamp"),
        )
        .arg(
            Arg::new("loglevel")
                .short('L')
                .long("loglevel")
                .value_name("LOGLEVEL")
                .value_parser(value_parser!(LogLevel))
                .ignore_case(true)
                .default_value("info")
                .help("Set log level"),
        )
        .arg(
            Arg::new("quiet")
                .action(ArgAction::SetTrue)
                .long("quiet")
                .conflicts_with("loglevel")
                .help("Silence all output"),
        )
        .arg(
            Arg::new("locations_screen")
                .short('l')
                .long("locations-screen")
                .alias("locations_screen")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .help("File (with header) listing insertion locations (replicon, position, direction) to be counted; all other locations are ignored [default: count all locations]"),
        )
        .arg(
            Arg::new("output_file")
                .short('o')
                .long("output-file")
                .alias("output_file")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("Output file"),
        )
        .arg(
            Arg::new("show_totals")
                .short('T')
                .long("show-totals")
                .action(ArgAction::SetTrue)
                .help("Add a column with the total reads over all input files"),
        )
        .arg(
            Arg::new("input_files")
                .value_parser(value_parser!(PathBuf))
                .value_name("INPUT_FILE")
                .num_args(1..)
                .required(true)
                .help("Input files with read counts per location"),
        )
}

/// Set up Config structure from matched arguments
fn config_from_matches(m: &ArgMatches) -> Config {
    let input_files: Vec<PathBuf> = m
        .get_many::<PathBuf>("input_files")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    let output_file = m
        .get_one::<PathBuf>("output_file")
        .expect("Missing output file")
        .clone();

    let mut cfg = Config::new(input_files, output_file);

    if let Some(p) = m.get_one::<PathBuf>("locations_screen") {
        cfg.set_screen_file(p)
    }
    if m.get_flag("show_totals") {
        cfg.set_show_totals()
    }
    cfg
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    let cfg = config_from_matches(&m);
    debug!("Number of input files: {}", cfg.input_files().len());
    Ok(cfg)
}
