// dartnml/src/lib.rs

pub mod cli;
pub mod config;
pub mod constants;

pub use config::Config;
