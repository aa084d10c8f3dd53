//! Run configuration loaded from JSON

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::sources::{NameSubstitutions, SourceReader};
use crate::types::*;

/// Timestamp appended to every output file name
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H%M";

/// Everything one reconciliation run needs to know
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Element lookup table (CSV)
    pub elements_file: PathBuf,
    /// Payroll registers and costing files, in any order
    pub input_files: Vec<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub output_name: String,
    #[serde(default)]
    pub name_substitutions: NameSubstitutions,
    /// Payroll balances skipped outright. Defaults to "Tuition Non Cash".
    #[serde(default)]
    pub excluded_balances: Option<Vec<String>>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl RunConfig {
    pub fn new(elements_file: impl Into<PathBuf>, output_name: &str) -> Self {
        Self {
            elements_file: elements_file.into(),
            input_files: Vec::new(),
            output_dir: default_output_dir(),
            output_name: output_name.to_string(),
            name_substitutions: NameSubstitutions::new(),
            excluded_balances: None,
        }
    }

    /// Parse a JSON config. Relative paths are taken relative to `base`.
    pub fn from_json(json: &str, base: &Path) -> ReconResult<Self> {
        let mut config: RunConfig = serde_json::from_str(json)?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file; relative paths resolve against its directory
    pub fn load<P: AsRef<Path>>(path: P) -> ReconResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Config(format!("{}: {}", path.display(), e)))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let config = Self::from_json(&json, base)?;
        debug!(
            config = %path.display(),
            inputs = config.input_files.len(),
            substitutions = config.name_substitutions.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> ReconResult<()> {
        if self.input_files.is_empty() {
            return Err(ReconError::Config("No input files were given".to_string()));
        }
        if self.output_name.trim().is_empty() {
            return Err(ReconError::Config("Output name cannot be empty".to_string()));
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.elements_file);
        resolve(&mut self.output_dir);
        self.input_files.iter_mut().for_each(resolve);
    }

    /// Output file stem: the configured name followed by the run timestamp
    pub fn output_stem(&self, now: NaiveDateTime) -> String {
        format!("{} {}", self.output_name, now.format(OUTPUT_TIMESTAMP_FORMAT))
    }

    /// Source reader carrying this run's substitutions and exclusions
    pub fn source_reader(&self) -> SourceReader {
        let reader = SourceReader::new(self.name_substitutions.clone());
        match &self.excluded_balances {
            Some(balances) => reader.with_excluded_balances(balances.clone()),
            None => reader,
        }
    }
}
