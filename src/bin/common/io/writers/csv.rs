use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use itertools::Itertools;
use log::debug;
use rayon::prelude::*;
use strum::IntoEnumIterator;

use firebehavior::models::output::OutputVariableName;

use crate::common::{
    config::models::{PredictionRecord, ScenarioOutput},
    helpers::{extract_errors, CLIError},
};

use super::prelude::OutputSink;

fn format_value(value: Option<f32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Quote a text field when it would break the row
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn prediction_header() -> String {
    let variables = OutputVariableName::iter().map(|var| format!("{var} [{}]", var.units()));
    ["case", "fuelModel", "canSpread"]
        .into_iter()
        .map(String::from)
        .chain(variables)
        .chain(std::iter::once("error".to_string()))
        .join(",")
}

fn prediction_row(idx: usize, record: &PredictionRecord) -> String {
    match record {
        PredictionRecord::Success(result) => {
            let values = OutputVariableName::iter().map(|var| format_value(var.get(result)));
            [
                idx.to_string(),
                escape(&result.conditions.fuel_model),
                result.can_spread.to_string(),
            ]
            .into_iter()
            .chain(values)
            .chain(std::iter::once(String::new()))
            .join(",")
        }
        PredictionRecord::Failure { error, kind } => {
            let empty = OutputVariableName::iter().map(|_| String::new());
            [idx.to_string(), String::new(), String::new()]
                .into_iter()
                .chain(empty)
                .chain(std::iter::once(escape(&format!("{kind}: {error}"))))
                .join(",")
        }
    }
}

/// Rows of a scenario, header first
pub fn scenario_lines(output: &ScenarioOutput) -> Vec<String> {
    match output {
        ScenarioOutput::Prediction { results, .. } => std::iter::once(prediction_header())
            .chain(results.iter().enumerate().map(|(idx, r)| prediction_row(idx, r)))
            .collect(),
        ScenarioOutput::Moisture { states, .. } => std::iter::once("hours,moisture,emc".to_string())
            .chain(states.iter().map(|state| {
                format!("{},{},{}", state.hours, state.moisture, format_value(state.emc))
            }))
            .collect(),
        ScenarioOutput::Drying { pattern, .. } => std::iter::once("hours,moisture".to_string())
            .chain(
                pattern
                    .steps
                    .iter()
                    .map(|sample| format!("{},{}", sample.hours, sample.moisture)),
            )
            .collect(),
    }
}

/// One CSV table per scenario, `{path}/{name}.csv`
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }

    fn write_scenario(&self, output: &ScenarioOutput) -> Result<(), CLIError> {
        let file = self.path.join(format!("{}.csv", output.name()));
        debug!("[CSV] Writing scenario {} to {:?}", output.name(), file);

        let handle = File::create(&file)
            .map_err(|err| format!("Cannot create file {}: error {err}", file.display()))?;
        let mut writer = BufWriter::new(handle);
        for line in scenario_lines(output) {
            writeln!(writer, "{line}")
                .map_err(|err| format!("Cannot write file {}: error {err}", file.display()))?;
        }
        writer
            .flush()
            .map_err(|err| format!("Cannot write file {}: error {err}", file.display()))?;

        debug!("[CSV] Done writing scenario {}", output.name());
        Ok(())
    }
}

impl OutputSink for CsvWriter {
    fn write(&mut self, outputs: &[ScenarioOutput]) -> Result<(), CLIError> {
        create_dir_all(&self.path).map_err(|err| {
            format!("Cannot create folder {}: error {err}", self.path.display())
        })?;

        let results: Vec<Result<(), CLIError>> = outputs
            .par_iter()
            .map(|output| self.write_scenario(output))
            .collect();

        extract_errors("CSV Errors", results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firebehavior::{
        models::{input::FireBehaviorParams, output::MoistureState},
        predict_fire_behavior, FireBehaviorConfig, FireBehaviorError,
    };

    #[test]
    fn prediction_table_has_one_row_per_case() {
        let config = FireBehaviorConfig::default();
        let ok = predict_fire_behavior(&FireBehaviorParams::default(), &config);
        let failed: Result<_, FireBehaviorError> =
            Err(FireBehaviorError::UnknownFuelModel("Unknown fuel model: 99".to_string()));
        let output = ScenarioOutput::Prediction {
            name: "cases".to_string(),
            results: vec![ok.into(), failed.into()],
        };

        let lines = scenario_lines(&output);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("case,fuelModel,canSpread,ros [ft/min],rosCh [ch/h]"));
        assert!(lines[0].ends_with(",error"));
        let n_columns = lines[0].split(',').count();
        assert_eq!(lines[1].split(',').count(), n_columns);
        assert!(lines[1].starts_with("0,2,true,2.31,"));
        assert!(lines[2].starts_with("1,,,"));
        assert!(lines[2].ends_with("Unknown fuel model: 99"));
    }

    #[test]
    fn moisture_table_leaves_missing_emc_empty() {
        let output = ScenarioOutput::Moisture {
            name: "sequence".to_string(),
            states: vec![
                MoistureState {
                    hours: 0.0,
                    moisture: 12.0,
                    emc: None,
                },
                MoistureState {
                    hours: 2.0,
                    moisture: 6.5,
                    emc: Some(6.0),
                },
            ],
        };
        assert_eq!(
            scenario_lines(&output),
            vec!["hours,moisture,emc", "0,12,", "2,6.5,6"]
        );
    }

    #[test]
    fn text_fields_are_quoted() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a, b"), "\"a, b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
