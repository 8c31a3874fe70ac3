use serde::de::Deserializer;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::FireBehaviorError,
    modules::{
        emc::{
            config::EMCModelConfig,
            constants::{RH_MAX, RH_MIN},
        },
        functions::ensure_finite,
        spread::constants::{
            DEFAULT_FUEL_MODEL, DEFAULT_FUEL_MOISTURE, DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE,
        },
    },
};

/// Instantaneous weather at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// air temperature [°F]
    #[serde(rename = "tempF")]
    pub temperature_f: f32,
    /// relative humidity [%]
    #[serde(rename = "rh")]
    pub relative_humidity: f32,
}

impl WeatherObservation {
    /// Validated observation: finite temperature, humidity within [0, 100] %
    pub fn new(temperature_f: f32, relative_humidity: f32) -> Result<Self, FireBehaviorError> {
        let temperature_f = ensure_finite(temperature_f, "Temperature")?;
        let relative_humidity = ensure_finite(relative_humidity, "Relative humidity")?;
        if !(RH_MIN..=RH_MAX).contains(&relative_humidity) {
            return Err(FireBehaviorError::OutOfRange(
                "Relative humidity must be between 0 and 100".to_string(),
            ));
        }
        Ok(Self {
            temperature_f,
            relative_humidity,
        })
    }

    /// Equilibrium moisture content of this observation [%]
    pub fn emc(&self, config: &EMCModelConfig) -> Result<f32, FireBehaviorError> {
        config.emc(self.temperature_f, self.relative_humidity)
    }
}

/// One step of a weather sequence: the conditions are held for `hours`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherStep {
    /// air temperature [°F]
    #[serde(rename = "tempF")]
    pub temp_f: f32,
    /// relative humidity [%]
    pub rh: f32,
    /// duration of the step [h]
    pub hours: f32,
}

impl WeatherStep {
    pub fn new(temp_f: f32, rh: f32, hours: f32) -> Self {
        Self { temp_f, rh, hours }
    }

    pub fn observation(&self) -> Result<WeatherObservation, FireBehaviorError> {
        WeatherObservation::new(self.temp_f, self.rh)
    }
}

/// Read a weather sequence from an untyped value, as received from a form or a JSON file.
pub fn parse_weather_steps(value: &Value) -> Result<Vec<WeatherStep>, FireBehaviorError> {
    let steps = value.as_array().ok_or_else(|| {
        FireBehaviorError::InvalidInput("Weather steps must be an array".to_string())
    })?;

    steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            let field = |name: &str| -> Result<f32, FireBehaviorError> {
                step.get(name)
                    .and_then(Value::as_f64)
                    .map(|v| v as f32)
                    .ok_or_else(|| {
                        FireBehaviorError::InvalidInput(format!(
                            "Weather step {idx} must have a numeric '{name}'"
                        ))
                    })
            };
            Ok(WeatherStep {
                temp_f: field("tempF")?,
                rh: field("rh")?,
                hours: field("hours")?,
            })
        })
        .collect()
}

/// Fuel model identifiers arrive either as text ("2") or as plain numbers (2)
#[derive(Deserialize)]
#[serde(untagged)]
enum FuelModelId {
    Text(String),
    Number(u32),
}

fn deserialize_fuel_model<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match <FuelModelId as serde::Deserialize>::deserialize(deserializer)? {
        FuelModelId::Text(id) => id,
        FuelModelId::Number(id) => id.to_string(),
    })
}

/// Inputs of a fire behavior prediction. Missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FireBehaviorParams {
    /// midflame wind speed [mph]
    pub wind_speed: f32,
    /// dead fine fuel moisture [%]
    pub fuel_moisture: f32,
    /// terrain slope [°]
    pub slope: f32,
    /// fuel model identifier
    #[serde(deserialize_with = "deserialize_fuel_model")]
    pub fuel_model: String,
    /// air temperature [°F]
    pub temp: Option<f32>,
    /// relative humidity [%]
    pub rh: Option<f32>,
    /// replace `fuel_moisture` with the EMC of `temp` and `rh`
    #[serde(rename = "useEMC")]
    pub use_emc: bool,
}

impl Default for FireBehaviorParams {
    fn default() -> Self {
        Self {
            wind_speed: 0.0,
            fuel_moisture: DEFAULT_FUEL_MOISTURE,
            slope: 0.0,
            fuel_model: DEFAULT_FUEL_MODEL.to_string(),
            temp: Some(DEFAULT_TEMPERATURE),
            rh: Some(DEFAULT_HUMIDITY),
            use_emc: false,
        }
    }
}
