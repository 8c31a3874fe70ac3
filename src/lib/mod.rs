//! Surface fire behavior from weather and fuel inputs.
//!
//! Three stateless models are composed top-down: the equilibrium moisture
//! content regression ([`modules::emc`]), the time-lag moisture relaxation
//! ([`modules::timelag`]) and the Rothermel surface spread model with the
//! Byram intensity and flame length relations ([`modules::spread`]).

pub mod constants;
pub mod error;
pub mod models;
pub mod modules;
pub mod version;

pub use error::FireBehaviorError;
pub use modules::emc::{config::EMCModelConfig, functions::compute_emc};
pub use modules::spread::{
    config::FireBehaviorConfig,
    functions::{
        calculate_fireline_intensity, calculate_flame_length, calculate_rate_of_spread,
        predict_fire_behavior,
    },
};
pub use modules::timelag::functions::{calculate_drying_pattern, run_model, step_moisture};
