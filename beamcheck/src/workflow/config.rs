use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Treat validation errors as a failed run.
    #[serde(default)]
    pub strict: bool,
    /// Print the canonical JSON of the record after checking it.
    #[serde(default)]
    pub canonical: bool,
}

impl CheckConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading check config {}", path_ref.display()))?;
        let config: CheckConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing check config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(strict: bool, canonical: bool) -> Self {
        Self { strict, canonical }
    }

    /// Command-line switches can only turn options on.
    pub fn merge_args(self, strict: bool, canonical: bool) -> Self {
        Self {
            strict: self.strict || strict,
            canonical: self.canonical || canonical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_sets_flags() {
        let cfg = CheckConfig::from_args(true, false);
        assert!(cfg.strict);
        assert!(!cfg.canonical);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"strict: true\n").unwrap();
        let path = temp.into_temp_path();
        let cfg = CheckConfig::load(&path).unwrap();
        assert_eq!(cfg, CheckConfig::from_args(true, false));
        assert_eq!(
            cfg.merge_args(false, true),
            CheckConfig::from_args(true, true)
        );
    }

    #[test]
    fn config_load_reports_path_on_bad_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"strict: [not a bool\n").unwrap();
        let path = temp.into_temp_path();
        let err = CheckConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parsing check config"));
    }
}
