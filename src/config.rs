//! Helper configuration and JSON input loading

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context;
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::helpers::isb::DEFAULT_NAME;
use crate::landmarks::LandmarksTranslator;
use crate::trial::Trial;
use crate::types::{Region, Sex, Side};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HelperConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_region")]
    pub region: Region,
    #[serde(default = "default_side")]
    pub side: Side,
    #[serde(default)]
    pub sex: Option<Sex>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_region() -> Region {
    Region::Full
}

fn default_side() -> Side {
    Side::Both
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            region: default_region(),
            side: default_side(),
            sex: None,
        }
    }
}

impl HelperConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        read_json(path).with_context(|| format!("Failed to load helper config {}", path.display()))
    }
}

/// Read a trial from `.json` or gzipped `.json.gz`
pub fn load_trial(path: &Path) -> anyhow::Result<Trial> {
    let mut trial: Trial =
        read_json(path).with_context(|| format!("Failed to load trial {}", path.display()))?;
    if trial.name.is_empty() {
        trial.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().trim_end_matches(".json").to_string())
            .unwrap_or_default();
    }
    Ok(trial)
}

/// Read a canonical -> external landmark table (JSON object)
pub fn load_translator(path: &Path, name: &str) -> anyhow::Result<LandmarksTranslator> {
    let mapping: BTreeMap<String, String> =
        read_json(path).with_context(|| format!("Failed to load landmark table {}", path.display()))?;
    Ok(LandmarksTranslator::new(name, mapping))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.extension().map(|e| e == "gz").unwrap_or(false) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}
