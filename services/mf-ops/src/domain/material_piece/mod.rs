//! 原材料件与使用记录领域模块

pub mod piece;
pub mod repository;
pub mod splitter;
pub mod usage;

pub use piece::{MaterialPiece, PieceSource, PieceStatus};
pub use repository::{
    MaterialPieceRepository, MaterialUsageRepository, PieceFilter, UsageFilter,
};
pub use splitter::{PieceDimensions, PieceSplitter, whole_piece_count};
pub use usage::MaterialUsage;
