//! 物料主数据领域模块

#![allow(clippy::module_inception)]

pub mod item;
pub mod repository;

pub use item::{Item, ItemCategory};
pub use repository::{ItemFilter, ItemRepository};
