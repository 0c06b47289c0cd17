//! 仓库领域模块

#![allow(clippy::module_inception)]

pub mod repository;
pub mod warehouse;

pub use repository::{WarehouseFilter, WarehouseRepository};
pub use warehouse::{Warehouse, WarehouseType};
