use std::collections::HashMap;

use lazy_static::lazy_static;
use ndarray::{Array1, Zip};
use serde_derive::Serialize;

use crate::{
    constants::TONS_PER_ACRE_TO_LB_PER_FT2,
    error::FireBehaviorError,
    models::{input::FireBehaviorParams, output::FireBehaviorResult},
};

use super::{
    config::FireBehaviorConfig,
    constants::{BOP1, BOP2, DEFAULT_HEAT_CONTENT, PARTICLE_DENSITY},
    functions::predict_fire_behavior,
};

/// Physical description of a standard fuel model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelModelProperties {
    pub id: &'static str,
    pub name: &'static str,
    /// 1-h dead fuel load [tons/acre]
    pub fuel_load: f32,
    /// surface-area-to-volume ratio [1/ft]
    pub sav_ratio: f32,
    /// fuel bed depth [ft]
    pub depth: f32,
    /// dead fuel moisture of extinction [%]
    pub moisture_extinction: f32,
    /// [BTU/lb]
    pub heat_content: f32,
}

impl FuelModelProperties {
    /// oven-dry fuel load [lb/ft²]
    pub fn mass_per_area(&self) -> f32 {
        self.fuel_load * TONS_PER_ACRE_TO_LB_PER_FT2
    }

    /// bulk density over particle density [-]
    pub fn packing_ratio(&self) -> f32 {
        self.mass_per_area() / self.depth / PARTICLE_DENSITY
    }

    pub fn optimum_packing_ratio(&self) -> f32 {
        BOP1 * self.sav_ratio.powf(BOP2)
    }
}

macro_rules! fuel_model {
    ($id:expr, $name:expr, $load:expr, $sav:expr, $depth:expr, $mx:expr) => {
        FuelModelProperties {
            id: $id,
            name: $name,
            fuel_load: $load,
            sav_ratio: $sav,
            depth: $depth,
            moisture_extinction: $mx,
            heat_content: DEFAULT_HEAT_CONTENT,
        }
    };
}

/// Anderson (1982) standard fire behavior fuel models 1-13
pub static FUEL_MODEL_TABLE: [FuelModelProperties; 13] = [
    // grass
    fuel_model!("1", "Short grass", 0.74, 3500.0, 1.0, 12.0),
    fuel_model!("2", "Timber (grass and understory)", 2.0, 3000.0, 1.0, 15.0),
    fuel_model!("3", "Tall grass", 3.01, 1500.0, 2.5, 25.0),
    // shrub
    fuel_model!("4", "Chaparral", 5.01, 2000.0, 6.0, 20.0),
    fuel_model!("5", "Brush", 1.0, 2000.0, 2.0, 20.0),
    fuel_model!("6", "Dormant brush, hardwood slash", 1.5, 1750.0, 2.5, 25.0),
    fuel_model!("7", "Southern rough", 1.13, 1750.0, 2.5, 40.0),
    // timber litter
    fuel_model!("8", "Closed timber litter", 1.5, 2000.0, 0.2, 30.0),
    fuel_model!("9", "Hardwood litter", 2.92, 2500.0, 0.2, 25.0),
    fuel_model!("10", "Timber (litter and understory)", 3.01, 2000.0, 1.0, 25.0),
    // slash
    fuel_model!("11", "Light logging slash", 1.5, 1500.0, 1.0, 15.0),
    fuel_model!("12", "Medium logging slash", 4.01, 1500.0, 2.3, 20.0),
    fuel_model!("13", "Heavy logging slash", 7.01, 1500.0, 3.0, 25.0),
];

lazy_static! {
    static ref FUEL_MODELS: HashMap<&'static str, &'static FuelModelProperties> =
        FUEL_MODEL_TABLE.iter().map(|model| (model.id, model)).collect();
}

/// Find a fuel model by identifier ("1" to "13")
pub fn lookup_fuel_model(id: &str) -> Result<&'static FuelModelProperties, FireBehaviorError> {
    FUEL_MODELS
        .get(id.trim())
        .copied()
        .ok_or_else(|| FireBehaviorError::UnknownFuelModel(format!("Unknown fuel model: {id}")))
}

/// A set of independent predictions evaluated in parallel
#[derive(Debug)]
pub struct FireBehaviorBatch {
    pub data: Array1<FireBehaviorParams>,
}

impl FireBehaviorBatch {
    pub fn new(params: Vec<FireBehaviorParams>) -> Self {
        Self {
            data: Array1::from(params),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One result per parameter set, in the same order
    pub fn predict(
        &self,
        config: &FireBehaviorConfig,
    ) -> Array1<Result<FireBehaviorResult, FireBehaviorError>> {
        Zip::from(&self.data).par_map_collect(|params| predict_fire_behavior(params, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lookup_known_fuel_models() {
        for (idx, model) in FUEL_MODEL_TABLE.iter().enumerate() {
            let found = lookup_fuel_model(&(idx + 1).to_string()).expect("should exist");
            assert_eq!(found, model);
        }
        assert_eq!(lookup_fuel_model(" 2 ").map(|m| m.name), Ok("Timber (grass and understory)"));
    }

    #[test]
    fn lookup_unknown_fuel_model() {
        for id in ["0", "14", "99", "grass", ""] {
            let err = lookup_fuel_model(id).unwrap_err();
            assert!(matches!(err, FireBehaviorError::UnknownFuelModel(_)));
        }
        assert_eq!(
            lookup_fuel_model("99").unwrap_err().to_string(),
            "Unknown fuel model: 99"
        );
    }

    #[test]
    fn derived_fuel_bed_properties() {
        let model = lookup_fuel_model("2").expect("should exist");
        assert_relative_eq!(model.mass_per_area(), 0.0918274, max_relative = 1e-5);
        assert_relative_eq!(model.packing_ratio(), 0.00286961, max_relative = 1e-4);
        assert_relative_eq!(
            model.optimum_packing_ratio(),
            3.348 * 3000_f32.powf(-0.8189),
            max_relative = 1e-6
        );
    }

    #[test]
    fn batch_predictions_keep_order() {
        let batch = FireBehaviorBatch::new(vec![
            FireBehaviorParams::default(),
            FireBehaviorParams {
                fuel_model: "99".to_string(),
                ..FireBehaviorParams::default()
            },
            FireBehaviorParams {
                fuel_model: "1".to_string(),
                fuel_moisture: 20.0,
                ..FireBehaviorParams::default()
            },
        ]);
        assert_eq!(batch.len(), 3);
        let results = batch.predict(&FireBehaviorConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0],
            predict_fire_behavior(&FireBehaviorParams::default(), &FireBehaviorConfig::default())
        );
        assert!(matches!(results[1], Err(FireBehaviorError::UnknownFuelModel(_))));
        assert_eq!(results[2].as_ref().map(|r| r.can_spread), Ok(false));
    }
}
