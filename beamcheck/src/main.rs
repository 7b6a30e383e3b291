use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use workflow::check::check_document;
use workflow::config::CheckConfig;

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Validate a beam detection-format document")]
struct Args {
    /// JSON document to check; reads stdin when omitted
    input: Option<PathBuf>,
    /// Load check options from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Exit with an error status when the beam is invalid
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Print the canonical JSON form of the beam
    #[arg(long, default_value_t = false)]
    canonical: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config {
        CheckConfig::load(path)?.merge_args(args.strict, args.canonical)
    } else {
        CheckConfig::from_args(args.strict, args.canonical)
    };

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            buffer
        }
    };

    let report = check_document(&text, &config)?;
    log::debug!("parsed {:?}", report.beam);
    if report.is_valid() {
        println!("valid");
    } else {
        for error in &report.errors {
            println!("{}", error);
        }
    }
    if let Some(canonical) = &report.canonical {
        println!("{}", canonical);
    }

    if report.failed(&config) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
