//! 物料用量計算

use gop_core::{MaterialLine, OrderAggregate, UsageRule};
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::MaterialRequirement;

/// 物料用量計算器
pub struct ConsumptionCalculator;

impl ConsumptionCalculator {
    /// 計算單項物料的需求量（未進位）
    ///
    /// 結果 = 基礎用量 × (1 + 損耗% / 100)，損耗只乘一次。
    /// 規則引用的顏色/尺碼/尺碼組查不到時一律貢獻 0，不報錯
    pub fn required_quantity(
        rule: &UsageRule,
        wastage_percent: Decimal,
        aggregate: &OrderAggregate,
    ) -> Decimal {
        let base = match rule {
            UsageRule::Generic(per_unit) => {
                *per_unit * Decimal::from(aggregate.total_quantity)
            }
            UsageRule::ByColor(map) => map
                .iter()
                .map(|(color_name, per_unit)| {
                    Decimal::from(aggregate.quantity_for_color(color_name)) * *per_unit
                })
                .sum(),
            UsageRule::BySizeGroup(map) => map
                .iter()
                .map(|(group_name, per_unit)| {
                    Decimal::from(aggregate.quantity_for_group(group_name)) * *per_unit
                })
                .sum(),
            UsageRule::ByIndividualSize(map) => map
                .iter()
                .map(|(size_label, per_unit)| {
                    Decimal::from(aggregate.quantity_for_size(size_label)) * *per_unit
                })
                .sum(),
            UsageRule::CustomGroup(map) => map
                .iter()
                .map(|(group_key, per_unit)| {
                    let group_quantity: u32 = group_key
                        .split(gop_core::usage_rule::CUSTOM_GROUP_SEPARATOR)
                        .map(|label| aggregate.quantity_for_size(label.trim()))
                        .sum();
                    Decimal::from(group_quantity) * *per_unit
                })
                .sum(),
        };

        base * (Decimal::ONE + wastage_percent / Decimal::ONE_HUNDRED)
    }

    /// 表示層進位：無條件進位到整數單位
    ///
    /// 刻意獨立於 `required_quantity`，核心計算只回傳精確值
    pub fn ceil_units(quantity: Decimal) -> Decimal {
        quantity.ceil()
    }

    /// 批次計算整張物料表的需求量（rayon 並行）
    ///
    /// 結果順序與輸入的物料行項一致
    pub fn required_quantities(
        materials: &[MaterialLine],
        aggregate: &OrderAggregate,
    ) -> Vec<MaterialRequirement> {
        tracing::info!(
            "開始用量計算：物料 {} 筆，訂單總件數 {}",
            materials.len(),
            aggregate.total_quantity
        );

        materials
            .par_iter()
            .map(|material| {
                MaterialRequirement::new(
                    material.id,
                    Self::required_quantity(&material.rule, material.wastage_percent, aggregate),
                )
            })
            .collect()
    }
}
