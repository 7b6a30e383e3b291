use crate::workflow::config::CheckConfig;
use anyhow::Context;
use detectionformats::prelude::Validate;
use detectionformats::Beam;
use log::info;

#[derive(Debug)]
pub struct CheckReport {
    pub beam: Beam,
    pub errors: Vec<String>,
    pub canonical: Option<String>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the run should be reported as a failure under `config`.
    pub fn failed(&self, config: &CheckConfig) -> bool {
        config.strict && !self.is_valid()
    }
}

/// Parses and validates one beam document.
pub fn check_document(text: &str, config: &CheckConfig) -> anyhow::Result<CheckReport> {
    let beam = Beam::parse(text).context("reading beam document")?;
    let errors = beam.errors();
    info!("checked beam: {} validation error(s)", errors.len());

    let canonical = if config.canonical {
        Some(beam.to_json_string().context("serializing beam")?)
    } else {
        None
    };

    Ok(CheckReport {
        beam,
        errors,
        canonical,
    })
}
