//! # GOP Calculation Engine
//!
//! 訂單數量核心計算引擎：配比分配、物料用量、分配帳本與策略

pub mod consumption;
pub mod ledger;
pub mod ratio;
pub mod strategy;

// Re-export 主要類型
pub use consumption::ConsumptionCalculator;
pub use ledger::AllocationLedger;
pub use ratio::RatioDistributor;
pub use strategy::{AllocationStrategy, AllocationStrategyEngine};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 單項物料的需求計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// 物料ID
    pub material_id: Uuid,

    /// 需求量（未進位；表示層再決定是否進位到整數單位）
    pub required_quantity: Decimal,
}

impl MaterialRequirement {
    /// 創建新的需求計算結果
    pub fn new(material_id: Uuid, required_quantity: Decimal) -> Self {
        Self {
            material_id,
            required_quantity,
        }
    }
}
