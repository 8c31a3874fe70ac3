use crate::error::FireBehaviorError;

use super::{constants::DEFAULT_EMC_MODEL, functions::compute_emc};

pub type EMCFnType = fn(f32, f32) -> Result<f32, FireBehaviorError>;

/// configuration structure for the EMC engine
/// holds the EMC function used by the moisture and spread models
#[derive(Debug, Clone)]
pub struct EMCModelConfig {
    pub model_version: String,
    emc_fn: EMCFnType,
}

impl EMCModelConfig {
    pub fn new(model_version_str: &str) -> Self {
        // Simard is the only built-in set, other versions fall back to it
        let emc_fn: EMCFnType = compute_emc;

        EMCModelConfig {
            model_version: model_version_str.to_owned(),
            emc_fn,
        }
    }

    /// Use a caller supplied EMC function in place of the built-in ones
    pub fn with_emc_fn(model_version_str: &str, emc_fn: EMCFnType) -> Self {
        EMCModelConfig {
            model_version: model_version_str.to_owned(),
            emc_fn,
        }
    }

    pub fn emc(
        &self,
        temp_f: f32, // temperature [°F]
        rh: f32,     // relative humidity [%]
    ) -> Result<f32, FireBehaviorError> {
        (self.emc_fn)(temp_f, rh)
    }
}

impl Default for EMCModelConfig {
    fn default() -> Self {
        EMCModelConfig::new(DEFAULT_EMC_MODEL)
    }
}
