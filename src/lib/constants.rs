// UNIT CONVERSIONS
/// pounds in one short ton
pub const LB_PER_TON: f32 = 2000.0;
/// square feet in one acre
pub const FT2_PER_ACRE: f32 = 43560.0;
/// tons/acre -> lb/ft²
pub const TONS_PER_ACRE_TO_LB_PER_FT2: f32 = LB_PER_TON / FT2_PER_ACRE;
/// feet in one chain
pub const FT_PER_CHAIN: f32 = 66.0;
/// feet -> meters
pub const FT_TO_M: f32 = 0.3048;
/// mph -> ft/min
pub const MPH_TO_FT_PER_MIN: f32 = 88.0;
pub const MINUTES_PER_HOUR: f32 = 60.0;
pub const SECONDS_PER_MINUTE: f32 = 60.0;
