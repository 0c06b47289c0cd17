//! 通用工具函数

use uuid::Uuid;

/// 生成新的 UUID v7（时间有序）
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// 规范化业务编码：去除首尾空白并转为大写
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// 大小写不敏感的包含匹配（用于列表搜索）
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
