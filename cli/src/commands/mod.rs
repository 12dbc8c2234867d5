pub mod calibrate;
pub mod interval;
