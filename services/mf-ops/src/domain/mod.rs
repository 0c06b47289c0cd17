//! 领域层

pub mod component_issue;
pub mod geometry;
pub mod ids;
pub mod inventory;
pub mod item;
pub mod material_piece;
pub mod numbering;
pub mod opening_stock;
pub mod osp;
pub mod purchase_order;
pub mod repositories;
pub mod value_objects;
pub mod vendor;
pub mod warehouse;

pub use repositories::Repositories;
