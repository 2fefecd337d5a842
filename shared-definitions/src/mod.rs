#![no_std]

pub mod controller;
