// Marketplace agenda library
// Exports all modules for the binary, tests and benches

pub mod cli;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;
pub mod views;
