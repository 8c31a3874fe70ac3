/// Rothermel (1972) surface fire spread, Albini (1976) fuel model parameters,
/// Byram (1959) flame length

// prediction defaults
pub const DEFAULT_FUEL_MODEL: &str = "2";
pub const DEFAULT_FUEL_MOISTURE: f32 = 10.0; // %
pub const DEFAULT_TEMPERATURE: f32 = 70.0; // °F
pub const DEFAULT_HUMIDITY: f32 = 30.0; // %

pub const DEFAULT_HEAT_CONTENT: f32 = 8000.0; // BTU/lb
pub const PARTICLE_DENSITY: f32 = 32.0; // lb/ft³

// moisture damping
pub const MD1: f32 = 2.59;
pub const MD2: f32 = 5.11;
pub const MD3: f32 = 3.52;

/// reaction intensity time normalization [min]
pub const REACTION_TIME: f32 = 60.0;

// propagating flux ratio
pub const PF1: f32 = 0.792;
pub const PF2: f32 = 0.681;
pub const PF3: f32 = 0.1;
pub const PF4: f32 = 192.0;
pub const PF5: f32 = 0.2595;

// optimum packing ratio
pub const BOP1: f32 = 3.348;
pub const BOP2: f32 = -0.8189;

// wind coefficient
pub const WC1: f32 = 7.47;
pub const WC2: f32 = 0.133;
pub const WC3: f32 = 0.55;
pub const WB1: f32 = 0.02526;
pub const WB2: f32 = 0.54;
pub const WE1: f32 = 0.715;
pub const WE2: f32 = 3.59e-4;

// slope coefficient
pub const SC1: f32 = 5.275;
pub const SC2: f32 = -0.3;
pub const MAX_SLOPE: f32 = 90.0; // °

/// scaling of the no-wind no-slope rate of spread
pub const ROS_SCALING: f32 = 1.5;

// Byram flame length: L = 0.45 * I^0.46, I [BTU/ft/s], L [ft]
pub const BYRAM_A: f32 = 0.45;
pub const BYRAM_B: f32 = 0.46;

// reporting precision (decimals)
pub const ROS_DECIMALS: i32 = 2;
pub const FLAME_LENGTH_DECIMALS: i32 = 1;
pub const INTENSITY_DECIMALS: i32 = 0;
pub const REACTION_INTENSITY_DECIMALS: i32 = 1;
pub const EMC_DECIMALS: i32 = 1;
