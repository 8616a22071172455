//! 物料用量規則模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{PlanError, Result};

/// 自訂尺碼分組鍵的分隔符
pub const CUSTOM_GROUP_SEPARATOR: &str = ",";

/// 用量規則
///
/// 決定一項物料/輔料的單件用量如何隨訂單數量放大。
/// 規則中引用的名稱查不到時一律視為 0，不報錯
/// （訂單編輯中途的半配置狀態是常態，不是失敗）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UsageRule {
    /// 通用：單件用量 × 訂單總件數
    Generic(Decimal),

    /// 按顏色：顏色名稱 -> 單件用量
    ByColor(HashMap<String, Decimal>),

    /// 按尺碼組：尺碼組名稱 -> 單件用量
    BySizeGroup(HashMap<String, Decimal>),

    /// 按單一尺碼：尺碼標籤 -> 單件用量
    ByIndividualSize(HashMap<String, Decimal>),

    /// 自訂尺碼分組：逗號串接的尺碼列表 -> 單件用量
    CustomGroup(HashMap<String, Decimal>),
}

impl UsageRule {
    /// 已被自訂分組佔用的尺碼標籤
    pub fn custom_grouped_sizes(&self) -> HashSet<String> {
        match self {
            UsageRule::CustomGroup(map) => map
                .keys()
                .flat_map(|key| key.split(CUSTOM_GROUP_SEPARATOR))
                .map(|label| label.trim().to_string())
                .collect(),
            _ => HashSet::new(),
        }
    }
}

/// 物料/輔料行項（面料、鈕扣、繡花等）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLine {
    /// 物料ID
    pub id: Uuid,

    /// 物料名稱
    pub name: String,

    /// 用量規則
    pub rule: UsageRule,

    /// 損耗百分比（乘法套用一次，不逐鍵疊加）
    pub wastage_percent: Decimal,
}

impl MaterialLine {
    /// 創建新的物料行項
    pub fn new(name: String, rule: UsageRule) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            rule,
            wastage_percent: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置損耗百分比
    pub fn with_wastage_percent(mut self, percent: Decimal) -> Self {
        self.wastage_percent = percent;
        self
    }

    /// 替換用量規則（變體或任一鍵值變更時整體替換）
    pub fn set_rule(&mut self, rule: UsageRule) {
        self.rule = rule;
    }

    /// 追加一個自訂尺碼分組
    ///
    /// 選取的尺碼必須非空，且不得與既有分組重疊；
    /// 規則尚非 `CustomGroup` 時先轉換為空的自訂分組
    pub fn add_custom_group(&mut self, sizes: &[String], per_unit: Decimal) -> Result<()> {
        if sizes.is_empty() {
            return Err(PlanError::CustomGroupOverlap("未選取任何尺碼".to_string()));
        }

        let grouped = self.rule.custom_grouped_sizes();
        let overlapping: Vec<&String> =
            sizes.iter().filter(|size| grouped.contains(*size)).collect();
        if !overlapping.is_empty() {
            return Err(PlanError::CustomGroupOverlap(format!(
                "尺碼 {overlapping:?} 已屬於其他分組"
            )));
        }

        let key = sizes.to_vec().join(CUSTOM_GROUP_SEPARATOR);
        match &mut self.rule {
            UsageRule::CustomGroup(map) => {
                map.insert(key, per_unit);
            }
            _ => {
                let mut map = HashMap::new();
                map.insert(key, per_unit);
                self.rule = UsageRule::CustomGroup(map);
            }
        }
        Ok(())
    }
}
