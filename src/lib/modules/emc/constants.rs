/// Equilibrium Moisture Content, Simard (1968) regression on Nelson's data
/// Source: https://wikifire.wsl.ch/tiki-indexf2f0.html?page=Equilibrium+moisture+content

pub const DEFAULT_EMC_MODEL: &str = "simard";

// relative humidity bands [%]
pub const RH_MIN: f32 = 0.0;
pub const RH_LOW: f32 = 10.0;
pub const RH_MID: f32 = 50.0;
pub const RH_MAX: f32 = 100.0;

// rh <= 10
pub const L0: f32 = 0.03229;
pub const L1: f32 = 0.281073;
pub const L2: f32 = 0.000578;
// 10 < rh <= 50
pub const M0: f32 = 2.22749;
pub const M1: f32 = 0.160107;
pub const M2: f32 = 0.01478;
// rh > 50
pub const H0: f32 = 21.0606;
pub const H1: f32 = 0.005565;
pub const H2: f32 = 0.00035;
pub const H3: f32 = 0.483199;

// physical bounds of the result [%]
pub const EMC_MIN: f32 = 0.1;
pub const EMC_MAX: f32 = 40.0;
