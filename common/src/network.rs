pub mod outcome;
pub mod ports;
pub mod target;
