// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod generator;
pub mod profile;
pub mod source;
