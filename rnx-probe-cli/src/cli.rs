use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    pub fn new() -> Self {
        Self {
            matches: {
                Command::new("rnx-probe")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("RINEX observation files metadata and data quality")
                    .long_about(
                        "Examines RINEX (V2, V3) observation files: survey metadata,
observed constellations, sampling interval, duration and antenna position.
Gzip compressed files are supported.
Use RUST_LOG to adjust verbosity.",
                    )
                    .arg_required_else_help(true)
                    .color(ColorChoice::Always)
                    .arg(
                        Arg::new("filepath")
                            .short('f')
                            .long("fp")
                            .value_name("FILE")
                            .value_parser(value_parser!(PathBuf))
                            .action(ArgAction::Append)
                            .required(true)
                            .help("Input RINEX file. Can be repeated."),
                    )
                    .arg(
                        Arg::new("json")
                            .long("json")
                            .action(ArgAction::SetTrue)
                            .help("Export the examinations as JSON, instead of text reports."),
                    )
                    .arg(
                        Arg::new("quiet")
                            .short('q')
                            .long("quiet")
                            .action(ArgAction::SetTrue)
                            .help("Only report failures."),
                    )
                    .get_matches()
            },
        }
    }

    /// Input files, in order of appearance
    pub fn input_paths(&self) -> Vec<&PathBuf> {
        self.matches
            .get_many::<PathBuf>("filepath")
            .map(|paths| paths.collect())
            .unwrap_or_default()
    }

    pub fn json(&self) -> bool {
        self.matches.get_flag("json")
    }

    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }
}
