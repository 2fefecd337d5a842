#![cfg_attr(not(test), no_std)]

pub mod communication_interfaces;
pub mod config;
pub mod control;
pub mod drivers;
pub mod shared_core_values;
pub mod util;

#[cfg(test)]
pub(crate) mod mock;
