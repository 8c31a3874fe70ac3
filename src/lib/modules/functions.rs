use crate::error::FireBehaviorError;

/// Reject NaN and infinities, the numeric stand-in for a missing argument
pub fn ensure_finite(value: f32, name: &str) -> Result<f32, FireBehaviorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FireBehaviorError::InvalidInput(format!(
            "{name} must be a number"
        )))
    }
}

pub fn ensure_non_negative(value: f32, name: &str) -> Result<f32, FireBehaviorError> {
    let value = ensure_finite(value, name)?;
    if value < 0.0 {
        return Err(FireBehaviorError::OutOfRange(format!(
            "{name} must be non-negative"
        )));
    }
    Ok(value)
}

/// Round to a fixed number of decimal places for reporting
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let factor = 10_f32.powi(decimals);
    (value * factor).round() / factor
}
