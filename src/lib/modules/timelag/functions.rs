use serde_json::Value;
use strum::IntoEnumIterator;

use crate::{
    error::FireBehaviorError,
    models::{
        input::{parse_weather_steps, WeatherStep},
        output::{ClassMoisture, DryingPattern, DryingSample, MoistureState},
    },
    modules::{
        emc::config::EMCModelConfig,
        functions::{ensure_finite, ensure_non_negative, round_to},
    },
};

use super::{constants::*, models::TimeLagClass};

fn ensure_time_lag(time_lag_hours: f32) -> Result<f32, FireBehaviorError> {
    let time_lag_hours = ensure_finite(time_lag_hours, "Time lag")?;
    if time_lag_hours <= 0.0 {
        return Err(FireBehaviorError::DomainError(
            "Time lag must be greater than 0".to_string(),
        ));
    }
    Ok(time_lag_hours)
}

/// Advance the fuel moisture towards the equilibrium value
/// # Arguments
/// * `current` - Current fuel moisture \[%\]
/// * `emc` - Equilibrium moisture content \[%\]
/// * `elapsed_hours` - Time step \[h\]
/// * `time_lag_hours` - Time-lag constant of the fuel class \[h\]
/// # Returns
/// * new fuel moisture, never negative \[%\]
pub fn step_moisture(
    current: f32,
    emc: f32,
    elapsed_hours: f32,
    time_lag_hours: f32,
) -> Result<f32, FireBehaviorError> {
    let current = ensure_finite(current, "Current moisture")?;
    let emc = ensure_finite(emc, "EMC")?;
    let elapsed_hours = ensure_non_negative(elapsed_hours, "Elapsed hours")?;
    let time_lag_hours = ensure_time_lag(time_lag_hours)?;

    // drying-wetting dynamic
    let moisture = emc + (current - emc) * f32::exp(-elapsed_hours / time_lag_hours);

    Ok(moisture.max(0.0))
}

/// Moisture of every time-lag class after the same exposure
pub fn moisture_by_class(
    current: f32,
    emc: f32,
    elapsed_hours: f32,
) -> Result<Vec<ClassMoisture>, FireBehaviorError> {
    TimeLagClass::iter()
        .map(|time_lag| {
            Ok(ClassMoisture {
                time_lag,
                moisture: step_moisture(current, emc, elapsed_hours, time_lag.hours())?,
            })
        })
        .collect()
}

/// Apply a weather sequence to a fuel, one state per step plus the initial one.
/// Moisture and EMC are rounded to 1 decimal in the reported states only.
pub fn run_model(
    initial_moisture: f32,
    steps: &[WeatherStep],
    time_lag: f32,
    config: &EMCModelConfig,
) -> Result<Vec<MoistureState>, FireBehaviorError> {
    let initial_moisture = ensure_non_negative(initial_moisture, "Initial moisture")?;
    let time_lag = ensure_time_lag(time_lag)?;

    let mut results = Vec::with_capacity(steps.len() + 1);
    results.push(MoistureState {
        hours: 0.0,
        moisture: round_to(initial_moisture, MOISTURE_DECIMALS),
        emc: None,
    });

    let mut moisture = initial_moisture;
    let mut hours = 0.0;
    for step in steps {
        let emc = step.observation()?.emc(config)?;
        moisture = step_moisture(moisture, emc, step.hours, time_lag)?;
        hours += step.hours;
        results.push(MoistureState {
            hours,
            moisture: round_to(moisture, MOISTURE_DECIMALS),
            emc: Some(round_to(emc, MOISTURE_DECIMALS)),
        });
    }
    Ok(results)
}

/// Same as [`run_model`], with the weather sequence still in untyped form
pub fn run_model_value(
    initial_moisture: f32,
    steps: &Value,
    time_lag: f32,
    config: &EMCModelConfig,
) -> Result<Vec<MoistureState>, FireBehaviorError> {
    let steps = parse_weather_steps(steps)?;
    run_model(initial_moisture, &steps, time_lag, config)
}

fn describe_pattern(initial: f32, final_moisture: f32, duration_hours: f32) -> String {
    if (final_moisture - initial).abs() < 0.05 {
        format!("Fuel moisture holds at {initial:.1}% over {duration_hours} hours")
    } else if final_moisture < initial {
        format!(
            "Fuel moisture drops from {initial:.1}% to {final_moisture:.1}% over {duration_hours} hours"
        )
    } else {
        format!(
            "Fuel moisture rises from {initial:.1}% to {final_moisture:.1}% over {duration_hours} hours"
        )
    }
}

/// Moisture curve under constant weather.
///
/// The EMC is computed once; the period is split into at most 24 intervals of
/// `duration_hours / 24` hours (1 hour at least). When the duration is not a whole
/// number of intervals a last, shorter interval reaches the full duration.
pub fn calculate_drying_pattern(
    initial_moisture: f32,
    temp_f: f32,
    rh: f32,
    duration_hours: f32,
    time_lag: f32,
    config: &EMCModelConfig,
) -> Result<DryingPattern, FireBehaviorError> {
    let initial_moisture = ensure_non_negative(initial_moisture, "Initial moisture")?;
    let duration_hours = ensure_non_negative(duration_hours, "Duration")?;
    let time_lag = ensure_time_lag(time_lag)?;
    let emc = config.emc(temp_f, rh)?;

    let interval = f32::max(
        duration_hours / DRYING_PATTERN_INTERVALS as f32,
        MIN_DRYING_INTERVAL,
    );
    let n_intervals =
        (((duration_hours / interval) + HOURS_EPSILON).floor() as u32).min(DRYING_PATTERN_INTERVALS);

    let mut steps = Vec::with_capacity(n_intervals as usize + 2);
    steps.push(DryingSample {
        hours: 0.0,
        moisture: initial_moisture,
    });

    let mut moisture = initial_moisture;
    for idx in 1..=n_intervals {
        moisture = step_moisture(moisture, emc, interval, time_lag)?;
        steps.push(DryingSample {
            hours: idx as f32 * interval,
            moisture,
        });
    }

    let remainder = duration_hours - n_intervals as f32 * interval;
    if remainder > HOURS_EPSILON {
        moisture = step_moisture(moisture, emc, remainder, time_lag)?;
        steps.push(DryingSample {
            hours: duration_hours,
            moisture,
        });
    }

    let final_moisture = round_to(moisture, MOISTURE_DECIMALS);
    Ok(DryingPattern {
        emc,
        time_lag,
        steps,
        final_moisture,
        description: describe_pattern(initial_moisture, final_moisture, duration_hours),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::emc::functions::compute_emc;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    #[test]
    fn step_moisture_relaxes_towards_emc() {
        let m = step_moisture(20.0, 5.0, 1.0, 1.0).expect("valid input");
        assert_abs_diff_eq!(m, 5.0 + 15.0 * f32::exp(-1.0), epsilon = 1e-5);
        // after one time-lag the fuel closes ~63% of the gap
        let closed = (20.0 - m) / 15.0;
        assert_abs_diff_eq!(closed, 0.632, epsilon = 1e-3);
    }

    #[test]
    fn step_moisture_is_monotonic_in_elapsed_time() {
        let mut previous = 20.0;
        for t in 1..48 {
            let m = step_moisture(20.0, 5.0, t as f32 * 0.5, 10.0).expect("valid input");
            assert!(m < previous);
            assert!(m > 5.0);
            previous = m;
        }
    }

    #[test]
    fn slower_classes_respond_more_slowly() {
        let slow = step_moisture(20.0, 5.0, 1.0, 10.0).expect("valid input");
        let fast = step_moisture(20.0, 5.0, 1.0, 1.0).expect("valid input");
        assert!(slow > fast);
    }

    #[test]
    fn step_moisture_is_idempotent_at_equilibrium() {
        for (m, t, tau) in [(12.0, 3.0, 1.0), (0.5, 100.0, 1000.0), (30.0, 0.0, 10.0)] {
            assert_eq!(step_moisture(m, m, t, tau), Ok(m));
        }
    }

    #[test]
    fn step_moisture_rejects_invalid_time_lag() {
        for tau in [0.0, -1.0] {
            let err = step_moisture(20.0, 5.0, 1.0, tau).unwrap_err();
            assert_eq!(
                err,
                FireBehaviorError::DomainError("Time lag must be greater than 0".into())
            );
        }
        let err = step_moisture(20.0, 5.0, 1.0, f32::NAN).unwrap_err();
        assert!(matches!(err, FireBehaviorError::InvalidInput(_)));
        let err = step_moisture(20.0, 5.0, -1.0, 1.0).unwrap_err();
        assert!(matches!(err, FireBehaviorError::OutOfRange(_)));
    }

    #[test]
    fn moisture_by_class_orders_response() {
        let classes = moisture_by_class(20.0, 5.0, 6.0).expect("valid input");
        assert_eq!(classes.len(), 4);
        assert_eq!(classes[0].time_lag, TimeLagClass::OneHour);
        for pair in classes.windows(2) {
            assert!(pair[0].moisture < pair[1].moisture);
        }
    }

    #[test]
    fn run_model_single_step() {
        let steps = [WeatherStep::new(85.0, 25.0, 6.0)];
        let results = run_model(15.0, &steps, 1.0, &EMCModelConfig::default()).expect("valid");
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0],
            MoistureState {
                hours: 0.0,
                moisture: 15.0,
                emc: None
            }
        );
        assert_eq!(results[1].hours, 6.0);
        assert_eq!(results[1].moisture, 5.0);
        assert_eq!(results[1].emc, Some(5.0));
    }

    #[test]
    fn run_model_accumulates_hours_and_carries_moisture() {
        let steps = [
            WeatherStep::new(85.0, 25.0, 2.0),
            WeatherStep::new(60.0, 80.0, 3.0),
            WeatherStep::new(70.0, 40.0, 1.5),
        ];
        let results = run_model(15.0, &steps, 10.0, &EMCModelConfig::default()).expect("valid");
        let hours: Vec<f32> = results.iter().map(|s| s.hours).collect();
        assert_eq!(hours, vec![0.0, 2.0, 5.0, 6.5]);

        // unrounded reference: each step starts from the previous unrounded moisture
        let emc1 = compute_emc(85.0, 25.0).unwrap();
        let emc2 = compute_emc(60.0, 80.0).unwrap();
        let m1 = step_moisture(15.0, emc1, 2.0, 10.0).unwrap();
        let m2 = step_moisture(m1, emc2, 3.0, 10.0).unwrap();
        assert_eq!(results[2].moisture, round_to(m2, 1));
        assert_eq!(results[2].emc, Some(round_to(emc2, 1)));
    }

    #[test]
    fn run_model_propagates_errors() {
        let config = EMCModelConfig::default();
        let err = run_model(15.0, &[WeatherStep::new(85.0, 120.0, 6.0)], 1.0, &config)
            .unwrap_err();
        assert_eq!(err.to_string(), "Relative humidity must be between 0 and 100");
        let err = run_model(15.0, &[], 0.0, &config).unwrap_err();
        assert!(matches!(err, FireBehaviorError::DomainError(_)));
        let err = run_model(15.0, &[WeatherStep::new(85.0, 25.0, -2.0)], 1.0, &config)
            .unwrap_err();
        assert!(matches!(err, FireBehaviorError::OutOfRange(_)));
    }

    #[test]
    fn run_model_value_validates_steps() {
        let config = EMCModelConfig::default();
        let results = run_model_value(15.0, &json!([{"tempF": 85, "rh": 25, "hours": 6}]), 1.0, &config)
            .expect("valid");
        assert_eq!(results.len(), 2);

        let err = run_model_value(15.0, &json!("not steps"), 1.0, &config).unwrap_err();
        assert!(matches!(err, FireBehaviorError::InvalidInput(_)));
        let err = run_model_value(15.0, &json!([{"tempF": 85, "rh": 25}]), 1.0, &config)
            .unwrap_err();
        assert_eq!(err.to_string(), "Weather step 0 must have a numeric 'hours'");
    }

    #[test]
    fn drying_pattern_starts_at_initial_moisture() {
        let pattern = calculate_drying_pattern(20.0, 85.0, 25.0, 24.0, 1.0, &EMCModelConfig::default())
            .expect("valid");
        assert_eq!(pattern.steps[0].moisture, 20.0);
        assert_eq!(pattern.steps[0].hours, 0.0);
        assert_eq!(pattern.steps.len(), 25);
        assert_eq!(pattern.steps[24].hours, 24.0);
        assert_eq!(pattern.final_moisture, 5.0);
        assert_eq!(
            pattern.description,
            "Fuel moisture drops from 20.0% to 5.0% over 24 hours"
        );
    }

    #[test]
    fn drying_pattern_moves_monotonically_towards_emc() {
        let config = EMCModelConfig::default();
        // drying
        let pattern = calculate_drying_pattern(20.0, 85.0, 25.0, 12.0, 10.0, &config).expect("valid");
        for pair in pattern.steps.windows(2) {
            assert!(pair[1].moisture < pair[0].moisture);
            assert!(pair[1].moisture >= pattern.emc);
        }
        // wetting
        let pattern = calculate_drying_pattern(2.0, 60.0, 80.0, 12.0, 10.0, &config).expect("valid");
        for pair in pattern.steps.windows(2) {
            assert!(pair[1].moisture > pair[0].moisture);
            assert!(pair[1].moisture <= pattern.emc);
        }
        assert!(pattern.description.starts_with("Fuel moisture rises from 2.0%"));
        // equilibrium
        let emc = compute_emc(70.0, 30.0).unwrap();
        let pattern = calculate_drying_pattern(emc, 70.0, 30.0, 6.0, 1.0, &config).expect("valid");
        for sample in &pattern.steps {
            assert_abs_diff_eq!(sample.moisture, emc, epsilon = 1e-5);
        }
        assert!(pattern.description.starts_with("Fuel moisture holds at"));
    }

    #[test]
    fn drying_pattern_sampling() {
        let config = EMCModelConfig::default();
        // long periods are split in 24 intervals
        let pattern = calculate_drying_pattern(20.0, 85.0, 25.0, 48.0, 1.0, &config).expect("valid");
        assert_eq!(pattern.steps.len(), 25);
        assert_eq!(pattern.steps[1].hours, 2.0);
        // short periods use 1 hour intervals plus a last partial one
        let pattern = calculate_drying_pattern(20.0, 85.0, 25.0, 10.5, 1.0, &config).expect("valid");
        assert_eq!(pattern.steps.len(), 12);
        assert_eq!(pattern.steps[10].hours, 10.0);
        assert_eq!(pattern.steps[11].hours, 10.5);
        let expected = step_moisture(20.0, pattern.emc, 10.5, 1.0).unwrap();
        assert_abs_diff_eq!(pattern.steps[11].moisture, expected, epsilon = 1e-4);
        // nothing to sample
        let pattern = calculate_drying_pattern(20.0, 85.0, 25.0, 0.0, 1.0, &config).expect("valid");
        assert_eq!(pattern.steps.len(), 1);
        assert_eq!(pattern.final_moisture, 20.0);
    }

    #[test]
    fn drying_pattern_rejects_invalid_input() {
        let config = EMCModelConfig::default();
        let err = calculate_drying_pattern(20.0, 85.0, 25.0, -1.0, 1.0, &config).unwrap_err();
        assert_eq!(err.to_string(), "Duration must be non-negative");
        let err = calculate_drying_pattern(20.0, 85.0, 101.0, 24.0, 1.0, &config).unwrap_err();
        assert_eq!(err.to_string(), "Relative humidity must be between 0 and 100");
        let err = calculate_drying_pattern(20.0, 85.0, 25.0, 24.0, 0.0, &config).unwrap_err();
        assert!(matches!(err, FireBehaviorError::DomainError(_)));
    }
}
