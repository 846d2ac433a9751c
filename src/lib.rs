pub mod config;
pub mod cron;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod rpc;
pub mod store;
pub mod utils;

pub use config::Settings;
pub use cron::CronScheduler;
pub use error::{FetchError, RenderError, StorageError};
pub use rpc::RpcClient;
pub use store::{DataLayout, SnapshotStore};
