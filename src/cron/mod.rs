//! Periodic re-execution of the snapshot pipeline (optional mode).

mod scheduler;

pub use scheduler::CronScheduler;
