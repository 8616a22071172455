//! 分配帳本（已佔用與可用數量計算）

use gop_core::{AllocationRecord, CellKey, SizeGroup};
use std::collections::HashMap;
use uuid::Uuid;

/// 分配帳本計算器
///
/// 矩陣或記錄集合每次變動都整體重算，不做增量維護，
/// 從根本上排除快取漂移
pub struct AllocationLedger;

impl AllocationLedger {
    /// 由尺碼組集合物化訂單數量矩陣
    pub fn po_matrix(groups: &[SizeGroup]) -> HashMap<CellKey, u32> {
        let mut matrix = HashMap::new();
        for group in groups {
            for (key, &qty) in &group.breakdown {
                *matrix.entry(key.clone()).or_insert(0) += qty;
            }
        }
        matrix
    }

    /// 彙總各記錄已佔用的數量
    ///
    /// `excluding` 傳入編輯中記錄的ID，使其既有分配
    /// 不計入對自身的佔用；計算全局總佔用時傳 `None`
    pub fn used_matrix(
        records: &[AllocationRecord],
        excluding: Option<Uuid>,
    ) -> HashMap<CellKey, u32> {
        let mut used = HashMap::new();
        for record in records {
            if Some(record.id) == excluding {
                continue;
            }
            for (key, &qty) in &record.allocation {
                *used.entry(key.clone()).or_insert(0) += qty;
            }
        }
        used
    }

    /// 計算尚未被認領的可用數量
    ///
    /// 逐格 `max(0, 訂單數量 - 已佔用)`；只輸出訂單矩陣中
    /// 存在的儲存格，超額佔用也不會產生負值
    pub fn available_matrix(
        po_matrix: &HashMap<CellKey, u32>,
        used: &HashMap<CellKey, u32>,
    ) -> HashMap<CellKey, u32> {
        po_matrix
            .iter()
            .map(|(key, &qty)| {
                let used_qty = used.get(key).copied().unwrap_or(0);
                (key.clone(), qty.saturating_sub(used_qty))
            })
            .collect()
    }

    /// 訂單總件數
    pub fn grand_total(po_matrix: &HashMap<CellKey, u32>) -> u32 {
        po_matrix.values().sum()
    }

    /// 各記錄（可排除一筆）的分配總件數
    pub fn allocated_total(records: &[AllocationRecord], excluding: Option<Uuid>) -> u32 {
        records
            .iter()
            .filter(|record| Some(record.id) != excluding)
            .map(|record| record.recompute_total())
            .sum()
    }
}
