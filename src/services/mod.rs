#![allow(dead_code)]

pub mod session;
pub mod training_api;
