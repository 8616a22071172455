//! 裝箱分配記錄模型（packing instruction）

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::CellKey;

/// 裝箱分配記錄
///
/// 對訂單數量矩陣的一份認領。多筆記錄共享同一組尺碼組，
/// 彼此是平級關係；同一儲存格的認領總和不得超過訂單數量
/// （由帳本與策略引擎把關，記錄本身不驗證全局約束）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// 記錄ID
    pub id: Uuid,

    /// 名稱（如包裝方式：單色單碼、混色混碼）
    pub name: String,

    /// 分配矩陣：(顏色, 尺碼) -> 件數
    pub allocation: HashMap<CellKey, u32>,

    /// 分配總件數
    ///
    /// 衍生值：提交時一律由 `allocation` 重算覆寫，
    /// 不信任儲存層或呼叫端帶入的數字
    pub total_allocated: u32,
}

impl AllocationRecord {
    /// 創建新的分配記錄
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            allocation: HashMap::new(),
            total_allocated: 0,
        }
    }

    /// 建構器模式：設置分配矩陣（同步重算總數）
    pub fn with_allocation(mut self, allocation: HashMap<CellKey, u32>) -> Self {
        self.allocation = allocation;
        self.total_allocated = self.recompute_total();
        self
    }

    /// 設置單一儲存格（0 移除儲存格）
    pub fn set_quantity(&mut self, key: CellKey, quantity: u32) {
        if quantity == 0 {
            self.allocation.remove(&key);
        } else {
            self.allocation.insert(key, quantity);
        }
    }

    /// 讀取單一儲存格（未設定視為 0）
    pub fn quantity(&self, key: &CellKey) -> u32 {
        self.allocation.get(key).copied().unwrap_or(0)
    }

    /// 由分配矩陣重算總件數
    pub fn recompute_total(&self) -> u32 {
        self.allocation.values().sum()
    }

    /// 檢查是否為空分配
    pub fn is_empty(&self) -> bool {
        self.recompute_total() == 0
    }
}
