pub mod backup;
pub mod config;
pub mod constants;
pub mod db;
pub mod logging;
pub mod provision;

pub use provision::{ProvisionFailure, ProvisionReport, ProvisionStep, Provisioner};
