// src/github/mod.rs
pub mod commands;
pub mod input;

pub use input::{Args, Input};
