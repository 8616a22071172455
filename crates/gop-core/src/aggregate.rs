//! 訂單彙總（衍生視圖）

use std::collections::HashMap;

use crate::SizeGroup;

/// 訂單彙總
///
/// 由一組配色尺碼組即時加總而成，不獨立儲存；
/// 任何矩陣編輯後都應整體重算，而非增量修補
#[derive(Debug, Clone, Default)]
pub struct OrderAggregate {
    /// 訂單總件數
    pub total_quantity: u32,

    /// 按顏色名稱加總（跨尺碼組同名顏色合併）
    pub quantity_by_color_name: HashMap<String, u32>,

    /// 按尺碼標籤加總（跨尺碼組同名尺碼合併）
    pub quantity_by_size_label: HashMap<String, u32>,

    /// 按尺碼組名稱加總
    pub quantity_by_group_name: HashMap<String, u32>,
}

impl OrderAggregate {
    /// 由尺碼組集合計算彙總
    pub fn from_groups(groups: &[SizeGroup]) -> Self {
        let mut aggregate = Self::default();

        for group in groups {
            for color in &group.colors {
                for size in &group.sizes {
                    let qty = group.quantity(color.id, size);
                    if qty == 0 {
                        continue;
                    }

                    aggregate.total_quantity += qty;
                    *aggregate
                        .quantity_by_color_name
                        .entry(color.name.clone())
                        .or_insert(0) += qty;
                    *aggregate
                        .quantity_by_size_label
                        .entry(size.clone())
                        .or_insert(0) += qty;
                    *aggregate
                        .quantity_by_group_name
                        .entry(group.name.clone())
                        .or_insert(0) += qty;
                }
            }
        }

        aggregate
    }

    /// 某顏色名稱的總件數（未知名稱視為 0）
    pub fn quantity_for_color(&self, color_name: &str) -> u32 {
        self.quantity_by_color_name
            .get(color_name)
            .copied()
            .unwrap_or(0)
    }

    /// 某尺碼標籤的總件數（未知標籤視為 0）
    pub fn quantity_for_size(&self, size_label: &str) -> u32 {
        self.quantity_by_size_label
            .get(size_label)
            .copied()
            .unwrap_or(0)
    }

    /// 某尺碼組的總件數（未知名稱視為 0）
    pub fn quantity_for_group(&self, group_name: &str) -> u32 {
        self.quantity_by_group_name
            .get(group_name)
            .copied()
            .unwrap_or(0)
    }
}
