pub mod cli;
pub mod commands;
pub mod dosage;
pub mod plot;
pub mod utils;
