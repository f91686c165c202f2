use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocab::{LocationVocabulary, PaymentVocabulary, Vocabulary};

pub const DEFAULT_SEAT_COUNT: u32 = 28;
pub const DEFAULT_INPUT_GLOB: &str = "./input/**/*.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub id: String,
    #[serde(default = "default_seat_count")]
    pub seat_count: u32,
    #[serde(default)]
    pub datasources: Option<Vec<Datasource>>,
    #[serde(default)]
    pub outputs: Option<Outputs>,
    #[serde(default)]
    pub locations: LocationVocabulary,
    #[serde(default)]
    pub payment: PaymentVocabulary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datasource {
    pub name: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outputs {
    pub dir: Option<String>,
}

fn default_seat_count() -> u32 {
    DEFAULT_SEAT_COUNT
}

impl Default for Config {
    fn default() -> Self {
        Config {
            id: "bus".to_string(),
            seat_count: DEFAULT_SEAT_COUNT,
            datasources: None,
            outputs: None,
            locations: LocationVocabulary::default(),
            payment: PaymentVocabulary::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Read and validate a YAML config. Missing sections fall back to the built-in tables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
    let cfg: Config = serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::Invalid("missing id".into()));
        }
        // seat tokens are at most two digits
        if !(1..=99).contains(&self.seat_count) {
            return Err(ConfigError::Invalid(format!("seat_count out of range: {}", self.seat_count)));
        }
        for (label, words) in [("payment.paid", &self.payment.paid), ("payment.pending", &self.payment.pending)] {
            if words.iter().all(|w| w.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("empty keyword set: {}", label)));
            }
        }
        Ok(())
    }

    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary { payment: self.payment.clone(), locations: self.locations.clone() }
    }

    pub fn input_glob(&self) -> String {
        self.datasources
            .as_ref()
            .and_then(|d| d.first())
            .and_then(|d| d.path.clone())
            .unwrap_or_else(|| DEFAULT_INPUT_GLOB.to_string())
    }

    pub fn output_dir(&self) -> String {
        self.outputs
            .as_ref()
            .and_then(|o| o.dir.clone())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
    }
}
