use crate::{
    error::FireBehaviorError,
    modules::emc::config::EMCModelConfig,
};

/// configuration structure for the fire behavior prediction
/// carries the EMC engine used when the fuel moisture is derived from the weather
#[derive(Debug, Clone, Default)]
pub struct FireBehaviorConfig {
    emc_model: EMCModelConfig,
}

impl FireBehaviorConfig {
    /// Without an EMC engine the Simard regression is used
    pub fn new(emc_model: Option<EMCModelConfig>) -> Self {
        FireBehaviorConfig {
            emc_model: emc_model.unwrap_or_default(),
        }
    }

    pub fn emc_model(&self) -> &EMCModelConfig {
        &self.emc_model
    }

    pub fn emc(&self, temp_f: f32, rh: f32) -> Result<f32, FireBehaviorError> {
        self.emc_model.emc(temp_f, rh)
    }
}
