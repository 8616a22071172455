//! 分配策略引擎

use gop_core::{AllocationRecord, CellKey, PlanError, Result, SizeGroup};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 分配策略
///
/// 互斥的單選模式，不是帶轉移的狀態機：
/// 候選分配是「策略 + 當前輸入」的純函數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AllocationStrategy {
    /// 自動：認領全部剩餘可用數量
    Auto,

    /// 按顏色：選中顏色的每個尺碼全數認領
    ByColor(HashSet<uuid::Uuid>),

    /// 按尺碼組：選中尺碼組的每個儲存格全數認領
    BySizeGroup(HashSet<uuid::Uuid>),

    /// 手動：逐格輸入，逐格封頂
    Manual(HashMap<CellKey, u32>),
}

/// 分配策略引擎
pub struct AllocationStrategyEngine;

impl AllocationStrategyEngine {
    /// 依策略與可用數量產生候選分配（數量為 0 的儲存格不輸出）
    ///
    /// `previous` 傳入編輯中記錄的既有分配。手動模式的逐格上限是
    /// `可用數量 + 自身既有數量`，否則記錄會被自己已提交的數字鎖死，
    /// 無法原樣重新輸入
    pub fn build_allocation(
        strategy: &AllocationStrategy,
        groups: &[SizeGroup],
        available: &HashMap<CellKey, u32>,
        previous: Option<&HashMap<CellKey, u32>>,
    ) -> HashMap<CellKey, u32> {
        match strategy {
            AllocationStrategy::Auto => available
                .iter()
                .filter(|&(_, &qty)| qty > 0)
                .map(|(key, &qty)| (key.clone(), qty))
                .collect(),

            AllocationStrategy::ByColor(color_ids) => available
                .iter()
                .filter(|&(key, &qty)| qty > 0 && color_ids.contains(&key.color_id))
                .map(|(key, &qty)| (key.clone(), qty))
                .collect(),

            AllocationStrategy::BySizeGroup(group_ids) => {
                // 儲存格屬於某尺碼組 = 該組宣告的顏色 × 尺碼
                let mut member_cells: HashSet<CellKey> = HashSet::new();
                for group in groups.iter().filter(|g| group_ids.contains(&g.id)) {
                    member_cells.extend(group.cell_keys());
                }

                available
                    .iter()
                    .filter(|&(key, &qty)| qty > 0 && member_cells.contains(key))
                    .map(|(key, &qty)| (key.clone(), qty))
                    .collect()
            }

            AllocationStrategy::Manual(requested) => requested
                .iter()
                .filter_map(|(key, &qty)| {
                    let prior = previous
                        .and_then(|prev| prev.get(key))
                        .copied()
                        .unwrap_or(0);
                    let cap = available.get(key).copied().unwrap_or(0) + prior;
                    let capped = qty.min(cap);
                    (capped > 0).then(|| (key.clone(), capped))
                })
                .collect(),
        }
    }

    /// 驗證並提交候選分配
    ///
    /// 1. 由分配矩陣重算總數，不信任呼叫端帶入的 `total_allocated`
    /// 2. 總數為零 → `EmptyAllocation`
    /// 3. 其他記錄總量 + 本次 > 訂單總量 → `CapacityExceeded`（附超出量）
    /// 4. 成功時回傳 `total_allocated` 已覆寫的記錄
    pub fn validate_and_commit(
        mut record: AllocationRecord,
        other_records_total: u32,
        grand_total: u32,
    ) -> Result<AllocationRecord> {
        let total = record.recompute_total();
        tracing::debug!(
            "提交分配記錄 {}：本次 {}，其他記錄 {}，訂單總量 {}",
            record.id,
            total,
            other_records_total,
            grand_total
        );

        if total == 0 {
            return Err(PlanError::EmptyAllocation);
        }

        if other_records_total + total > grand_total {
            return Err(PlanError::CapacityExceeded {
                other_total: other_records_total,
                candidate_total: total,
                grand_total,
                excess: other_records_total + total - grand_total,
            });
        }

        record.total_allocated = total;
        tracing::info!("分配記錄 {} 提交成功，總件數 {}", record.id, total);
        Ok(record)
    }
}
