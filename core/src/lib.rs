extern crate self as erasure_core;

pub mod log;
