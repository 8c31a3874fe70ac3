use crate::{
    constants::{FT_TO_M, MPH_TO_FT_PER_MIN, SECONDS_PER_MINUTE, TONS_PER_ACRE_TO_LB_PER_FT2},
    error::FireBehaviorError,
    models::{
        input::FireBehaviorParams,
        output::{Conditions, FireBehaviorResult, FlameLength, RateOfSpread, SpreadResult},
    },
    modules::functions::{ensure_finite, ensure_non_negative, round_to},
};

use super::{
    config::FireBehaviorConfig,
    constants::*,
    models::{lookup_fuel_model, FuelModelProperties},
};

/// Moisture damping coefficient [-]
/// cubic in the ratio between fuel moisture and moisture of extinction, clipped in [0, 1]
pub fn moisture_damping(fuel_moisture: f32, moisture_extinction: f32) -> f32 {
    let r = fuel_moisture / moisture_extinction;
    let eta = 1.0 - MD1 * r + MD2 * r.powi(2) - MD3 * r.powi(3);
    eta.clamp(0.0, 1.0)
}

/// Reaction intensity [BTU/ft²/min]
pub fn reaction_intensity(fuel_load: f32, heat_content: f32, moisture_damping: f32) -> f32 {
    fuel_load * heat_content * moisture_damping / REACTION_TIME
}

/// Propagating flux ratio [-]
/// # Arguments
/// * `sav_ratio` - Surface-area-to-volume ratio \[1/ft\]
/// * `packing_ratio` - Fuel bed packing ratio \[-\]
pub fn propagating_flux_ratio(sav_ratio: f32, packing_ratio: f32) -> f32 {
    f32::exp((PF1 + PF2 * sav_ratio.sqrt()) * (packing_ratio + PF3)) / (PF4 + PF5 * sav_ratio)
}

/// Wind coefficient [-]
/// # Arguments
/// * `wind_speed` - Midflame wind speed \[mph\]
/// * `sav_ratio` - Surface-area-to-volume ratio \[1/ft\]
/// * `packing_ratio` - Fuel bed packing ratio \[-\]
/// * `optimum_packing_ratio` - Optimum packing ratio \[-\]
pub fn wind_coefficient(
    wind_speed: f32,
    sav_ratio: f32,
    packing_ratio: f32,
    optimum_packing_ratio: f32,
) -> f32 {
    if wind_speed <= 0.0 {
        return 0.0;
    }
    let c = WC1 * f32::exp(-WC2 * sav_ratio.powf(WC3));
    let b = WB1 * sav_ratio.powf(WB2);
    let e = WE1 * f32::exp(-WE2 * sav_ratio);
    let wind_ft_min = wind_speed * MPH_TO_FT_PER_MIN;
    c * wind_ft_min.powf(b) * (packing_ratio / optimum_packing_ratio).powf(-e)
}

/// Slope as percent grade
pub fn slope_percent(slope_degrees: f32) -> f32 {
    slope_degrees.to_radians().tan() * 100.0
}

/// Slope coefficient [-], zero on flat or downhill terrain.
/// Rothermel (1972) form `5.275 β^-0.3 tan²θ`: the fuel bed enters through the
/// packing ratio, SAV does not appear.
pub fn slope_coefficient(slope_degrees: f32, packing_ratio: f32) -> f32 {
    if slope_degrees <= 0.0 {
        return 0.0;
    }
    let tan_slope = slope_percent(slope_degrees) / 100.0;
    SC1 * packing_ratio.powf(SC2) * tan_slope.powi(2)
}

fn rate_of_spread(
    model: &FuelModelProperties,
    wind_speed: f32,
    fuel_moisture: f32,
    slope: f32,
) -> SpreadResult {
    if fuel_moisture >= model.moisture_extinction {
        return SpreadResult::no_spread();
    }
    let packing_ratio = model.packing_ratio();

    let damping = moisture_damping(fuel_moisture, model.moisture_extinction);
    let i_r = reaction_intensity(model.fuel_load, model.heat_content, damping);
    let xi = propagating_flux_ratio(model.sav_ratio, packing_ratio);
    let phi_w = wind_coefficient(
        wind_speed,
        model.sav_ratio,
        packing_ratio,
        model.optimum_packing_ratio(),
    );
    let phi_s = slope_coefficient(slope, packing_ratio);

    let base_ros = (i_r * xi) / (model.fuel_load * ROS_SCALING);
    let ros = base_ros * (1.0 + phi_w + phi_s);

    SpreadResult {
        rate_of_spread: RateOfSpread::from_ft_per_min(ros),
        can_spread: true,
        reaction_intensity: i_r,
    }
}

/// Rothermel surface rate of spread
/// # Arguments
/// * `wind_speed` - Midflame wind speed \[mph\]
/// * `fuel_moisture` - Dead fine fuel moisture \[%\]
/// * `slope` - Terrain slope \[°\]
/// * `fuel_model_id` - Fuel model identifier
/// # Returns
/// * rate of spread in ft/min, ch/h and m/min; no spread when the fuel is at or
///   above its moisture of extinction
pub fn calculate_rate_of_spread(
    wind_speed: f32,
    fuel_moisture: f32,
    slope: f32,
    fuel_model_id: &str,
) -> Result<SpreadResult, FireBehaviorError> {
    let model = lookup_fuel_model(fuel_model_id)?;
    let wind_speed = ensure_non_negative(wind_speed, "Wind speed")?;
    let fuel_moisture = ensure_non_negative(fuel_moisture, "Fuel moisture")?;
    let slope = ensure_finite(slope, "Slope")?;
    if slope >= MAX_SLOPE {
        return Err(FireBehaviorError::OutOfRange(
            "Slope must be less than 90 degrees".to_string(),
        ));
    }

    Ok(rate_of_spread(model, wind_speed, fuel_moisture, slope))
}

/// Fireline intensity [BTU/ft/s]
/// # Arguments
/// * `rate_of_spread` - Rate of spread \[ft/min\]
/// * `fuel_load` - Fuel load \[tons/acre\]
/// * `heat_content` - Heat content \[BTU/lb\]
pub fn calculate_fireline_intensity(rate_of_spread: f32, fuel_load: f32, heat_content: f32) -> f32 {
    let mass_per_area = fuel_load * TONS_PER_ACRE_TO_LB_PER_FT2;
    heat_content * mass_per_area * rate_of_spread / SECONDS_PER_MINUTE
}

/// Byram flame length from fireline intensity [BTU/ft/s].
/// Non-positive (and not-a-number) intensities give a zero length.
pub fn calculate_flame_length(intensity: f32) -> FlameLength {
    if intensity.is_nan() || intensity <= 0.0 {
        return FlameLength::default();
    }
    let feet = BYRAM_A * intensity.powf(BYRAM_B);
    FlameLength {
        feet,
        meters: feet * FT_TO_M,
    }
}

/// Full prediction: optional EMC, spread, fireline intensity and flame length,
/// rounded to the reported precision.
pub fn predict_fire_behavior(
    params: &FireBehaviorParams,
    config: &FireBehaviorConfig,
) -> Result<FireBehaviorResult, FireBehaviorError> {
    let model = lookup_fuel_model(&params.fuel_model)?;

    let (fuel_moisture, emc) = match (params.use_emc, params.temp, params.rh) {
        (true, Some(temp), Some(rh)) => {
            let emc = config.emc(temp, rh)?;
            (emc, Some(emc))
        }
        _ => (params.fuel_moisture, None),
    };
    let spread = calculate_rate_of_spread(
        params.wind_speed,
        fuel_moisture,
        params.slope,
        &params.fuel_model,
    )?;

    let conditions = Conditions {
        wind_speed: params.wind_speed,
        fuel_moisture: round_to(fuel_moisture, EMC_DECIMALS),
        slope: params.slope,
        fuel_model: model.id.to_string(),
        temp: params.temp,
        rh: params.rh,
        use_emc: params.use_emc,
    };
    let emc = emc.map(|emc| round_to(emc, EMC_DECIMALS));

    if !spread.can_spread {
        return Ok(FireBehaviorResult {
            can_spread: false,
            message: Some(format!(
                "Fuel moisture ({:.1}%) is at or above the moisture of extinction ({}%) of fuel model {}: fire will not spread",
                fuel_moisture, model.moisture_extinction, model.id
            )),
            fuel_model_name: model.name.to_string(),
            rate_of_spread: RateOfSpread::default(),
            reaction_intensity: 0.0,
            fireline_intensity: None,
            flame_length: None,
            emc,
            conditions,
        });
    }

    let ros = spread.rate_of_spread;
    let intensity = calculate_fireline_intensity(ros.ft_per_min, model.fuel_load, model.heat_content);
    let flame_length = calculate_flame_length(intensity);

    Ok(FireBehaviorResult {
        can_spread: true,
        message: None,
        fuel_model_name: model.name.to_string(),
        rate_of_spread: ros.map(|v| round_to(v, ROS_DECIMALS)),
        reaction_intensity: round_to(spread.reaction_intensity, REACTION_INTENSITY_DECIMALS),
        fireline_intensity: Some(round_to(intensity, INTENSITY_DECIMALS)),
        flame_length: Some(FlameLength {
            feet: round_to(flame_length.feet, FLAME_LENGTH_DECIMALS),
            meters: round_to(flame_length.meters, FLAME_LENGTH_DECIMALS),
        }),
        emc,
        conditions,
    })
}
