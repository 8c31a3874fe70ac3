pub mod emc;
pub mod functions;
pub mod spread;
pub mod timelag;
