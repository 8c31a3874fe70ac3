use std::collections::HashSet;

use chrono::Utc;
use log::{info, trace, warn};
use rayon::prelude::*;
use serde_derive::Serialize;

use firebehavior::{
    calculate_drying_pattern,
    models::output::{DryingPattern, FireBehaviorResult, MoistureState},
    modules::{
        emc::constants::DEFAULT_EMC_MODEL, spread::models::FireBehaviorBatch,
        timelag::models::MoistureRun,
    },
    EMCModelConfig, FireBehaviorConfig, FireBehaviorError,
};

use crate::common::{
    helpers::{extract_errors, CLIError},
    io::writers::{csv::CsvWriter, json::JsonWriter, prelude::OutputSink},
};

use super::builder::{
    ConfigContainer, DryingConfigBuilder, MoistureConfigBuilder, OutputFormat, OutputTypeConfig,
    PredictionConfigBuilder, ScenarioType,
};

/// A single prediction, or the reason it could not be made
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionRecord {
    Success(FireBehaviorResult),
    Failure { error: String, kind: String },
}

impl From<Result<FireBehaviorResult, FireBehaviorError>> for PredictionRecord {
    fn from(result: Result<FireBehaviorResult, FireBehaviorError>) -> Self {
        match result {
            Ok(result) => PredictionRecord::Success(result),
            Err(err) => PredictionRecord::Failure {
                error: err.message().to_string(),
                kind: err.kind().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ScenarioOutput {
    Prediction {
        name: String,
        results: Vec<PredictionRecord>,
    },
    Moisture {
        name: String,
        states: Vec<MoistureState>,
    },
    Drying {
        name: String,
        pattern: DryingPattern,
    },
}

impl ScenarioOutput {
    pub fn name(&self) -> &str {
        match self {
            ScenarioOutput::Prediction { name, .. } => name,
            ScenarioOutput::Moisture { name, .. } => name,
            ScenarioOutput::Drying { name, .. } => name,
        }
    }
}

impl PredictionConfigBuilder {
    fn evaluate(&self, config: &FireBehaviorConfig) -> ScenarioOutput {
        let batch = FireBehaviorBatch::new(self.cases.clone());
        let results = batch
            .predict(config)
            .iter()
            .cloned()
            .map(PredictionRecord::from)
            .collect();
        ScenarioOutput::Prediction {
            name: self.name.clone(),
            results,
        }
    }
}

impl MoistureConfigBuilder {
    fn evaluate(&self, config: &EMCModelConfig) -> Result<ScenarioOutput, FireBehaviorError> {
        let run = MoistureRun {
            initial_moisture: self.initial_moisture,
            time_lag: self.time_lag,
            steps: self.steps.clone(),
        };
        Ok(ScenarioOutput::Moisture {
            name: self.name.clone(),
            states: run.run(config)?,
        })
    }
}

impl DryingConfigBuilder {
    fn evaluate(&self, config: &EMCModelConfig) -> Result<ScenarioOutput, FireBehaviorError> {
        let pattern = calculate_drying_pattern(
            self.initial_moisture,
            self.temp_f,
            self.rh,
            self.duration_hours,
            self.time_lag,
            config,
        )?;
        Ok(ScenarioOutput::Drying {
            name: self.name.clone(),
            pattern,
        })
    }
}

impl ScenarioType {
    /// Prediction scenarios never fail as a whole, failed cases are kept as records
    pub fn evaluate(&self, config: &FireBehaviorConfig) -> Result<ScenarioOutput, CLIError> {
        let output = match self {
            ScenarioType::Prediction(scenario) => Ok(scenario.evaluate(config)),
            ScenarioType::Moisture(scenario) => scenario.evaluate(config.emc_model()),
            ScenarioType::Drying(scenario) => scenario.evaluate(config.emc_model()),
        };
        output.map_err(|err| {
            CLIError::from(format!("scenario {}: {}", self.name(), CLIError::from(err)))
        })
    }
}

pub struct OutputWriter {
    sinks: Vec<Box<dyn OutputSink>>,
}

impl OutputWriter {
    pub fn new(outputs_defs: &[OutputTypeConfig]) -> Self {
        let sinks = outputs_defs
            .iter()
            .map(|def| -> Box<dyn OutputSink> {
                match def.format {
                    OutputFormat::Json => Box::new(JsonWriter::new(&def.path)),
                    OutputFormat::Csv => Box::new(CsvWriter::new(&def.path)),
                }
            })
            .collect();
        Self { sinks }
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn write_outputs(&mut self, outputs: &[ScenarioOutput]) -> Result<(), CLIError> {
        let results = self
            .sinks
            .par_iter_mut()
            .map(|sink| sink.write(outputs))
            .collect();
        extract_errors("Error writing outputs", results)
    }
}

/// Scenario names become output file names: they must be unique and plain
fn check_scenario_names(scenarios: &[ScenarioType]) -> Result<(), CLIError> {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        let name = scenario.name();
        if name.trim().is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
        {
            return Err(format!("Invalid scenario name '{name}'").into());
        }
        if !seen.insert(name) {
            return Err(format!("Duplicate scenario name '{name}'").into());
        }
    }
    Ok(())
}

pub struct Config {
    model_config: FireBehaviorConfig,
    scenarios: Vec<ScenarioType>,
    output_types_defs: Vec<OutputTypeConfig>,
}

impl Config {
    pub fn new(container: ConfigContainer) -> Result<Config, CLIError> {
        if container.scenarios.is_empty() {
            return Err("No scenarios defined in the configuration".into());
        }
        check_scenario_names(&container.scenarios)?;
        if container.model_version != DEFAULT_EMC_MODEL {
            warn!(
                "Unknown model version {}, falling back to {}",
                container.model_version, DEFAULT_EMC_MODEL
            );
        }
        let emc_model = EMCModelConfig::new(&container.model_version);
        info!("Model version: {}", emc_model.model_version);

        Ok(Config {
            model_config: FireBehaviorConfig::new(Some(emc_model)),
            scenarios: container.scenarios,
            output_types_defs: container.outputs,
        })
    }

    pub fn scenarios(&self) -> &[ScenarioType] {
        &self.scenarios
    }

    pub fn get_output_writer(&self) -> OutputWriter {
        OutputWriter::new(&self.output_types_defs)
    }

    /// Evaluate every scenario, skipping (and logging) the ones that fail
    pub fn evaluate(&self) -> Vec<ScenarioOutput> {
        self.scenarios
            .iter()
            .filter_map(|scenario| {
                let c = Utc::now();
                info!("Running scenario: {}", scenario.name());
                let output = scenario.evaluate(&self.model_config);
                trace!("Scenario {} took {} seconds", scenario.name(), Utc::now() - c);
                match output {
                    Ok(output) => Some(output),
                    Err(err) => {
                        warn!("Error running {}", err);
                        None
                    }
                }
            })
            .collect()
    }
}
