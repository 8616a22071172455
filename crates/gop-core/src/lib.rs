//! # GOP Core
//!
//! 成衣訂單規劃核心資料模型與類型定義

pub mod aggregate;
pub mod allocation;
pub mod size_group;
pub mod usage_rule;

// Re-export 主要類型
pub use aggregate::OrderAggregate;
pub use allocation::AllocationRecord;
pub use size_group::{sort_size_labels, CellKey, Color, SizeGroup};
pub use usage_rule::{MaterialLine, UsageRule};

/// 訂單規劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("配比權重全為零，無法分配")]
    InvalidRatio,

    #[error("配比權重數量 {weights} 與尺碼數量 {sizes} 不一致")]
    RatioLengthMismatch { weights: usize, sizes: usize },

    #[error("配比字串解析失敗: {0}")]
    RatioParse(String),

    #[error("分配總數為零，無法提交")]
    EmptyAllocation,

    #[error("分配超出訂單總量：其他記錄 {other_total} + 本次 {candidate_total} > 總量 {grand_total}（超出 {excess}）")]
    CapacityExceeded {
        other_total: u32,
        candidate_total: u32,
        grand_total: u32,
        excess: u32,
    },

    #[error("儲存格未宣告: {0}")]
    CellNotDeclared(String),

    #[error("自訂尺碼組與既有分組重疊: {0}")]
    CustomGroupOverlap(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
