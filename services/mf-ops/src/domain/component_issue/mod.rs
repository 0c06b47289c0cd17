//! 组件发料领域模块

pub mod issue;
pub mod repository;

pub use issue::{ComponentIssue, IssueStatus};
pub use repository::{ComponentIssueFilter, ComponentIssueRepository};
