use serde_derive::{Deserialize, Serialize};
use strum::EnumProperty as _;
use strum_macros::{Display, EnumIter, EnumProperty, EnumString};

use crate::{
    constants::{FT_PER_CHAIN, FT_TO_M, MINUTES_PER_HOUR},
    modules::timelag::models::TimeLagClass,
};

// ---------------- MOISTURE ---------------- //

/// Fuel moisture reported after each step of a weather sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistureState {
    /// cumulated hours since the start of the sequence [h]
    pub hours: f32,
    /// fuel moisture [%]
    pub moisture: f32,
    /// equilibrium moisture of the step, absent for the initial entry [%]
    pub emc: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DryingSample {
    pub hours: f32,
    pub moisture: f32,
}

/// Moisture curve under weather held constant for a whole period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryingPattern {
    pub emc: f32,
    pub time_lag: f32,
    pub steps: Vec<DryingSample>,
    pub final_moisture: f32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMoisture {
    pub time_lag: TimeLagClass,
    pub moisture: f32,
}

// ---------------- SPREAD ---------------- //

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RateOfSpread {
    #[serde(rename = "ftPerMin")]
    pub ft_per_min: f32,
    #[serde(rename = "chainsPerHour")]
    pub ch_per_hour: f32,
    #[serde(rename = "metersPerMin")]
    pub m_per_min: f32,
}

impl RateOfSpread {
    pub fn from_ft_per_min(ft_per_min: f32) -> Self {
        Self {
            ft_per_min,
            ch_per_hour: ft_per_min * MINUTES_PER_HOUR / FT_PER_CHAIN,
            m_per_min: ft_per_min * FT_TO_M,
        }
    }

    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            ft_per_min: f(self.ft_per_min),
            ch_per_hour: f(self.ch_per_hour),
            m_per_min: f(self.m_per_min),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadResult {
    pub rate_of_spread: RateOfSpread,
    pub can_spread: bool,
    /// [BTU/ft²/min]
    pub reaction_intensity: f32,
}

impl SpreadResult {
    pub fn no_spread() -> Self {
        Self {
            rate_of_spread: RateOfSpread::default(),
            can_spread: false,
            reaction_intensity: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlameLength {
    pub feet: f32,
    pub meters: f32,
}

/// Input conditions echoed back with a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    pub wind_speed: f32,
    /// fuel moisture actually used by the spread model [%]
    pub fuel_moisture: f32,
    pub slope: f32,
    pub fuel_model: String,
    pub temp: Option<f32>,
    pub rh: Option<f32>,
    #[serde(rename = "useEMC")]
    pub use_emc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireBehaviorResult {
    pub can_spread: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub fuel_model_name: String,
    pub rate_of_spread: RateOfSpread,
    /// [BTU/ft²/min]
    pub reaction_intensity: f32,
    /// [BTU/ft/s]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fireline_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flame_length: Option<FlameLength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emc: Option<f32>,
    pub conditions: Conditions,
}

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Copy,
    Clone,
    EnumString,
    EnumIter,
    EnumProperty,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum OutputVariableName {
    /// Rate of spread
    #[strum(props(long_name = "Rate of Spread", units = "ft/min"))]
    ros,
    /// Rate of spread in chains
    #[strum(props(long_name = "Rate of Spread", units = "ch/h"))]
    rosCh,
    /// Rate of spread in meters
    #[strum(props(long_name = "Rate of Spread", units = "m/min"))]
    rosM,
    /// Reaction intensity
    #[strum(props(long_name = "Reaction Intensity", units = "BTU/ft2/min"))]
    reactionIntensity,
    /// Fireline intensity
    #[strum(props(long_name = "Fireline Intensity", units = "BTU/ft/s"))]
    intensity,
    /// Flame length
    #[strum(props(long_name = "Flame Length", units = "ft"))]
    flameLength,
    /// Flame length in meters
    #[strum(props(long_name = "Flame Length", units = "m"))]
    flameLengthM,
    /// Fuel moisture used by the spread model
    #[strum(props(long_name = "Fuel Moisture", units = "%"))]
    fuelMoisture,
    /// Equilibrium moisture content
    #[strum(props(long_name = "Equilibrium Moisture Content", units = "%"))]
    emc,
}

impl OutputVariableName {
    pub fn long_name(&self) -> &'static str {
        self.get_str("long_name").unwrap_or_default()
    }

    pub fn units(&self) -> &'static str {
        self.get_str("units").unwrap_or_default()
    }

    /// Value of the variable in a prediction, if the prediction carries it
    pub fn get(&self, result: &FireBehaviorResult) -> Option<f32> {
        use OutputVariableName::*;
        match self {
            ros => Some(result.rate_of_spread.ft_per_min),
            rosCh => Some(result.rate_of_spread.ch_per_hour),
            rosM => Some(result.rate_of_spread.m_per_min),
            reactionIntensity => Some(result.reaction_intensity),
            intensity => result.fireline_intensity,
            flameLength => result.flame_length.map(|f| f.feet),
            flameLengthM => result.flame_length.map(|f| f.meters),
            fuelMoisture => Some(result.conditions.fuel_moisture),
            emc => result.emc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::str::FromStr;

    #[test]
    fn rate_of_spread_unit_conversions() {
        let ros = RateOfSpread::from_ft_per_min(66.0);
        assert_relative_eq!(ros.ch_per_hour, 60.0);
        assert_relative_eq!(ros.m_per_min, 20.1168, max_relative = 1e-6);
    }

    #[test]
    fn output_variable_properties() {
        let var = OutputVariableName::from_str("ROSCH").expect("should parse");
        assert_eq!(var, OutputVariableName::rosCh);
        assert_eq!(var.units(), "ch/h");
        assert_eq!(OutputVariableName::intensity.long_name(), "Fireline Intensity");
    }
}
