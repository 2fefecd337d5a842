pub mod controller;
pub mod i2c_adapter;
pub mod pwm_receiver;
