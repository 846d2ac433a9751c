//! Application configuration loading and validation.

mod config;

pub use config::{RpcSettings, SchedulerSettings, Settings, StorageSettings, TokenSettings};
