use rayon::prelude::*;
use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    error::FireBehaviorError,
    models::{input::WeatherStep, output::MoistureState},
    modules::emc::config::EMCModelConfig,
};

use super::{constants::DEFAULT_TIME_LAG, functions::run_model};

/// Dead fuel time-lag classes, by nominal response time
#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
pub enum TimeLagClass {
    /// fine fuels, < 1/4 inch
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,
    /// 1/4 to 1 inch
    #[strum(serialize = "10h")]
    #[serde(rename = "10h")]
    TenHour,
    /// 1 to 3 inches
    #[strum(serialize = "100h")]
    #[serde(rename = "100h")]
    HundredHour,
    /// 3 to 8 inches
    #[strum(serialize = "1000h")]
    #[serde(rename = "1000h")]
    ThousandHour,
}

impl TimeLagClass {
    pub fn hours(&self) -> f32 {
        match self {
            TimeLagClass::OneHour => 1.0,
            TimeLagClass::TenHour => 10.0,
            TimeLagClass::HundredHour => 100.0,
            TimeLagClass::ThousandHour => 1000.0,
        }
    }
}

fn default_time_lag() -> f32 {
    DEFAULT_TIME_LAG
}

/// A weather sequence applied to a single fuel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoistureRun {
    /// moisture at hour 0 [%]
    pub initial_moisture: f32,
    /// time-lag constant [h]
    #[serde(default = "default_time_lag")]
    pub time_lag: f32,
    pub steps: Vec<WeatherStep>,
}

impl MoistureRun {
    pub fn run(&self, config: &EMCModelConfig) -> Result<Vec<MoistureState>, FireBehaviorError> {
        run_model(self.initial_moisture, &self.steps, self.time_lag, config)
    }
}

/// Run independent weather sequences in parallel; results keep the order of `runs`
pub fn run_models(
    runs: &[MoistureRun],
    config: &EMCModelConfig,
) -> Vec<Result<Vec<MoistureState>, FireBehaviorError>> {
    runs.par_iter().map(|run| run.run(config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn time_lag_classes_parse_and_order() {
        assert_eq!(TimeLagClass::from_str("100h"), Ok(TimeLagClass::HundredHour));
        assert!(TimeLagClass::from_str("5h").is_err());
        assert_eq!(TimeLagClass::TenHour.to_string(), "10h");
        let hours: Vec<f32> = TimeLagClass::iter().map(|c| c.hours()).collect();
        assert_eq!(hours, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn run_models_keeps_order_and_errors() {
        let runs = vec![
            MoistureRun {
                initial_moisture: 15.0,
                time_lag: 1.0,
                steps: vec![WeatherStep::new(85.0, 25.0, 6.0)],
            },
            MoistureRun {
                initial_moisture: 15.0,
                time_lag: 0.0,
                steps: vec![WeatherStep::new(85.0, 25.0, 6.0)],
            },
            MoistureRun {
                initial_moisture: 5.0,
                time_lag: 10.0,
                steps: vec![],
            },
        ];
        let results = run_models(&runs, &EMCModelConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().map(|r| r.len()), Ok(2));
        assert!(matches!(results[1], Err(FireBehaviorError::DomainError(_))));
        assert_eq!(results[2].as_ref().map(|r| r.len()), Ok(1));
    }

    #[test]
    fn moisture_run_time_lag_defaults_to_one_hour() {
        let run: MoistureRun = serde_json::from_str(
            r#"{"initialMoisture": 12, "steps": [{"tempF": 70, "rh": 40, "hours": 2}]}"#,
        )
        .expect("should deserialize");
        assert_eq!(run.time_lag, 1.0);
        assert_eq!(run.steps[0], WeatherStep::new(70.0, 40.0, 2.0));
    }
}
