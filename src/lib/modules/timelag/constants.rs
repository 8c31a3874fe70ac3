pub const DEFAULT_TIME_LAG: f32 = 1.0; // hours

// drying pattern sampling
pub const DRYING_PATTERN_INTERVALS: u32 = 24;
pub const MIN_DRYING_INTERVAL: f32 = 1.0; // hours
pub const HOURS_EPSILON: f32 = 1e-4;

// reporting precision (decimals)
pub const MOISTURE_DECIMALS: i32 = 1;
