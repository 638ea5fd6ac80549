pub mod catalog;
pub mod config;
pub mod error;
pub mod leads;
pub mod pricing;
pub mod session;
pub mod telemetry;
