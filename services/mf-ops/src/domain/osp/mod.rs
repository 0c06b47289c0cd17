//! 外协加工（OSP）领域模块

pub mod job;
pub mod repository;

pub use job::{OspJob, OspJobStatus, OspReceipt};
pub use repository::{OspJobFilter, OspJobRepository};
