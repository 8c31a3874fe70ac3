use crate::{
    error::FireBehaviorError,
    modules::functions::ensure_finite,
};

use super::constants::*;

// Equilibrium Moisture Content [%] -> Simard formulation, unbounded
pub fn emc_simard(
    temp_f: f32, // temperature [°F]
    rh: f32,     // relative humidity [%]
) -> f32 {
    if rh <= RH_LOW {
        L0 + L1 * rh - L2 * temp_f * rh
    } else if rh <= RH_MID {
        M0 + M1 * rh - M2 * temp_f
    } else {
        H0 + H1 * rh.powi(2) - H2 * temp_f * rh - H3 * rh
    }
}

/// Equilibrium Moisture Content [%] of fine dead fuel
/// # Arguments
/// * `temp_f` - Air temperature \[°F\]
/// * `rh` - Relative humidity \[%\], must lie in \[0, 100\]
/// # Returns
/// * EMC clipped in \[0.1, 40\] \[%\]
pub fn compute_emc(temp_f: f32, rh: f32) -> Result<f32, FireBehaviorError> {
    let temp_f = ensure_finite(temp_f, "Temperature")?;
    let rh = ensure_finite(rh, "Relative humidity")?;
    if !(RH_MIN..=RH_MAX).contains(&rh) {
        return Err(FireBehaviorError::OutOfRange(
            "Relative humidity must be between 0 and 100".to_string(),
        ));
    }
    Ok(emc_simard(temp_f, rh).clamp(EMC_MIN, EMC_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn emc_mid_humidity_band() {
        let emc = compute_emc(85.0, 25.0).expect("valid input");
        assert_abs_diff_eq!(emc, 4.973865, epsilon = 1e-4);
        // upper edge of the band is still linear
        let emc = compute_emc(70.0, 50.0).expect("valid input");
        assert_abs_diff_eq!(emc, 9.19824, epsilon = 1e-4);
    }

    #[test]
    fn emc_low_humidity_band() {
        let emc = compute_emc(70.0, 5.0).expect("valid input");
        assert_abs_diff_eq!(emc, 1.235355, epsilon = 1e-4);
        // rh = 10 belongs to the low band
        let emc = compute_emc(70.0, 10.0).expect("valid input");
        assert_abs_diff_eq!(emc, 2.43842, epsilon = 1e-4);
    }

    #[test]
    fn emc_high_humidity_band() {
        let emc = compute_emc(60.0, 80.0).expect("valid input");
        assert_abs_diff_eq!(emc, 16.34068, epsilon = 1e-3);
        let emc = compute_emc(40.0, 100.0).expect("valid input");
        assert_abs_diff_eq!(emc, 26.9907, epsilon = 1e-3);
    }

    #[test]
    fn emc_is_clipped_to_physical_bounds() {
        assert_eq!(compute_emc(130.0, 0.0), Ok(EMC_MIN));
        for t in (0..=130).step_by(10) {
            for h in 0..=200 {
                let emc = compute_emc(t as f32, h as f32 * 0.5).expect("valid input");
                assert!((EMC_MIN..=EMC_MAX).contains(&emc), "emc({t}, {h}) = {emc}");
            }
        }
    }

    #[test]
    fn emc_rejects_humidity_out_of_range() {
        for rh in [-1.0, 100.5, 250.0] {
            let err = compute_emc(70.0, rh).unwrap_err();
            assert_eq!(err.to_string(), "Relative humidity must be between 0 and 100");
            assert!(matches!(err, FireBehaviorError::OutOfRange(_)));
        }
    }

    #[test]
    fn emc_rejects_non_numeric_input() {
        let err = compute_emc(f32::NAN, 30.0).unwrap_err();
        assert!(matches!(err, FireBehaviorError::InvalidInput(_)));
        let err = compute_emc(70.0, f32::NAN).unwrap_err();
        assert_eq!(err.to_string(), "Relative humidity must be a number");
    }
}
