use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dictionary::VariableDictionary;
use crate::error::Result;

pub const DEFAULT_INPUT: &str = "output.csv";
pub const DEFAULT_DICTIONARY_FILE: &str = "variable_names_labels.png";
pub const DEFAULT_DPI: u32 = 100;

/// What to do with a bound that lies on the wrong side of its ATE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorBarPolicy {
    /// Draw a zero-length bar and log a warning.
    #[default]
    Clamp,
    /// Fail the render.
    Reject,
}

/// One error-bar chart: which target it plots and how big the figure is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartSpec {
    pub target: String,
    pub file_name: String,
    pub width_in: f64,
    pub height_in: f64,
}

impl ChartSpec {
    pub fn for_target(target: &str, width_in: f64, height_in: f64) -> Self {
        Self {
            target: target.to_string(),
            file_name: format!("average_ate_{}.png", target.to_lowercase()),
            width_in,
            height_in,
        }
    }

    pub fn title(&self) -> String {
        format!("Average ATE for {}", self.target)
    }
}

/// Replacement dictionary supplied as two parallel arrays.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DictionarySource {
    pub codes: Vec<String>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub dpi: u32,
    pub charts: Vec<ChartSpec>,
    pub dictionary_file: String,
    pub dictionary: Option<DictionarySource>,
    pub error_bars: ErrorBarPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            dpi: DEFAULT_DPI,
            charts: vec![
                ChartSpec::for_target("ADDEPEV3", 12.0, 6.0),
                ChartSpec::for_target("MENTHLTH", 10.0, 6.0),
            ],
            dictionary_file: DEFAULT_DICTIONARY_FILE.to_string(),
            dictionary: None,
            error_bars: ErrorBarPolicy::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The configured dictionary, or the built-in survey dictionary when none is set.
    pub fn variable_dictionary(&self) -> Result<VariableDictionary> {
        match &self.dictionary {
            Some(source) => VariableDictionary::from_parallel(&source.codes, &source.labels),
            None => Ok(VariableDictionary::builtin()),
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
