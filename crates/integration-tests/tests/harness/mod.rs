// Each test binary uses only part of the harness
#![allow(dead_code)]

pub mod files;
pub mod input;
