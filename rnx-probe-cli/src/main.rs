//! Command line tool to examine RINEX observation files
#[macro_use]
extern crate log;

mod cli;

use cli::Cli;
use env_logger::{Builder, Env, Target};
use rnx_probe::prelude::{Examination, Hatanaka, Loader};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("json export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} file(s) could not be examined")]
    Failures(usize),
}

/// JSON export of one examined file
#[derive(Serialize)]
struct Record<'a> {
    file: String,
    examination: &'a Examination,
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let loader = Loader::default().with_decoder(Hatanaka);
    let support = loader.support();

    let mut failures = 0;
    let mut examinations = Vec::new();

    for path in cli.input_paths() {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        match loader.load(path) {
            Ok(content) => {
                debug!("{}: {} lines", name, content.lines.len());
                examinations.push((name, Examination::from_content(content)));
            },
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failures += 1;
            },
        }
    }

    if !cli.quiet() {
        if cli.json() {
            let records = examinations
                .iter()
                .map(|(file, examination)| Record {
                    file: file.clone(),
                    examination,
                })
                .collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            for (file, examination) in examinations.iter() {
                let report = examination
                    .report()
                    .with_file_name(file)
                    .with_support(support.clone());
                println!("{}", report);
            }
        }
    }

    if failures > 0 {
        Err(Error::Failures(failures))
    } else {
        Ok(())
    }
}
