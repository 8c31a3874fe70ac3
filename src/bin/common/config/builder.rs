use std::fs::File;
use std::io::Read;
use std::path::Path;

use firebehavior::{
    models::input::{FireBehaviorParams, WeatherStep},
    modules::{
        emc::constants::DEFAULT_EMC_MODEL,
        timelag::constants::DEFAULT_TIME_LAG,
    },
};
use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::common::helpers::CLIError;

const DEFAULT_DRYING_DURATION: f32 = 24.0; // hours

fn default_model_version() -> String {
    DEFAULT_EMC_MODEL.to_string()
}

fn default_time_lag() -> f32 {
    DEFAULT_TIME_LAG
}

fn default_drying_duration() -> f32 {
    DEFAULT_DRYING_DURATION
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[serde(alias = "JSON", alias = "Json")]
    Json,
    #[serde(alias = "CSV", alias = "Csv")]
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputTypeConfig {
    /// output folder
    pub path: String,
    pub format: OutputFormat,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionConfigBuilder {
    pub name: String,
    pub cases: Vec<FireBehaviorParams>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoistureConfigBuilder {
    pub name: String,
    pub initial_moisture: f32,
    #[serde(default = "default_time_lag")]
    pub time_lag: f32,
    pub steps: Vec<WeatherStep>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryingConfigBuilder {
    pub name: String,
    pub initial_moisture: f32,
    #[serde(rename = "tempF")]
    pub temp_f: f32,
    pub rh: f32,
    #[serde(default = "default_drying_duration")]
    pub duration_hours: f32,
    #[serde(default = "default_time_lag")]
    pub time_lag: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScenarioType {
    Prediction(PredictionConfigBuilder),
    Moisture(MoistureConfigBuilder),
    Drying(DryingConfigBuilder),
}

impl ScenarioType {
    pub fn name(&self) -> &str {
        match self {
            ScenarioType::Prediction(s) => &s.name,
            ScenarioType::Moisture(s) => &s.name,
            ScenarioType::Drying(s) => &s.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigContainer {
    #[serde(default = "default_model_version")]
    pub model_version: String,
    #[serde(default)]
    pub outputs: Vec<OutputTypeConfig>,
    pub scenarios: Vec<ScenarioType>,
}

impl ConfigContainer {
    pub fn from_file(config_file: &str) -> Result<ConfigContainer, CLIError> {
        let extension = Path::new(config_file)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension {
            "json" => Self::from_json(config_file),
            "yaml" | "yml" => Self::from_yaml(config_file),
            _ => Err(CLIError::from(format!(
                "Unsupported configuration format for file {config_file}"
            ))),
        }
    }

    fn read_file(config_file: &str) -> Result<String, CLIError> {
        let mut file = File::open(config_file)
            .map_err(|error| format!("error opening config file {config_file}: {error}"))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|error| format!("error reading config file {config_file}: {error}"))?;
        Ok(contents)
    }

    pub fn from_yaml(config_file: &str) -> Result<Self, CLIError> {
        Self::from_yaml_str(&Self::read_file(config_file)?)
    }

    pub fn from_json(config_file: &str) -> Result<Self, CLIError> {
        Self::from_json_str(&Self::read_file(config_file)?)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, CLIError> {
        serde_yaml::from_str(contents)
            .map_err(|error| CLIError::from(format!("error parsing yaml config: {error}")))
    }

    pub fn from_json_str(contents: &str) -> Result<Self, CLIError> {
        serde_json::from_str(contents)
            .map_err(|error| CLIError::from(format!("error parsing json config: {error}")))
    }
}
