//! Command implementations

pub mod config;
pub mod doctor;
pub mod plan;
pub mod rules;
pub mod run;
pub mod version;
