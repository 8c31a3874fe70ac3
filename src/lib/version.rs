pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nEMC: Simard (1968)\nSpread: Rothermel (1972), fuel models Anderson (1982)\nFlame length: Byram (1959)"
);
