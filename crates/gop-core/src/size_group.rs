//! 配色尺碼模型（訂單數量矩陣）

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{PlanError, Result};

/// 顏色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// 顏色ID
    pub id: Uuid,

    /// 顏色名稱
    pub name: String,
}

impl Color {
    /// 創建新的顏色
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// 矩陣儲存格座標（顏色 × 尺碼）
///
/// 序列化為 `"<顏色ID>|<尺碼>"` 字串，讓以此為鍵的映射可直接存成 JSON
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellKey {
    /// 顏色ID
    pub color_id: Uuid,

    /// 尺碼標籤
    pub size: String,
}

impl CellKey {
    /// 創建新的儲存格座標
    pub fn new(color_id: Uuid, size: String) -> Self {
        Self { color_id, size }
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.color_id, self.size)
    }
}

impl From<CellKey> for String {
    fn from(key: CellKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for CellKey {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let (color_id, size) = value
            .split_once('|')
            .ok_or_else(|| format!("無效的儲存格座標: {value}"))?;
        let color_id = color_id
            .parse::<Uuid>()
            .map_err(|e| format!("無效的顏色ID {color_id}: {e}"))?;
        Ok(Self::new(color_id, size.to_string()))
    }
}

/// 配色尺碼組（一張訂單數量矩陣）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeGroup {
    /// 尺碼組ID
    pub id: Uuid,

    /// 尺碼組名稱
    pub name: String,

    /// 尺碼列表（順序有意義：決定顯示順序與配比字串的位置對齊）
    pub sizes: Vec<String>,

    /// 顏色列表
    pub colors: Vec<Color>,

    /// 數量矩陣：(顏色, 尺碼) -> 件數，未設定的儲存格視為 0
    pub breakdown: HashMap<CellKey, u32>,

    /// 每個顏色最近套用的配比字串（僅供回顯，非權威數據）
    pub ratios: HashMap<Uuid, String>,
}

impl SizeGroup {
    /// 創建新的配色尺碼組
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            sizes: Vec::new(),
            colors: Vec::new(),
            breakdown: HashMap::new(),
            ratios: HashMap::new(),
        }
    }

    /// 建構器模式：設置尺碼列表（保留給定順序，去除重複）
    pub fn with_sizes(mut self, sizes: Vec<String>) -> Self {
        for size in sizes {
            self.add_size(size);
        }
        self
    }

    /// 建構器模式：添加單一尺碼
    pub fn with_size(mut self, size: String) -> Self {
        self.add_size(size);
        self
    }

    /// 建構器模式：添加顏色
    pub fn with_color(mut self, color: Color) -> Self {
        self.add_color(color);
        self
    }

    /// 添加尺碼（重複標籤忽略）
    pub fn add_size(&mut self, size: String) {
        if !self.sizes.contains(&size) {
            self.sizes.push(size);
        }
    }

    /// 添加顏色（重複ID忽略）
    pub fn add_color(&mut self, color: Color) {
        if !self.colors.iter().any(|c| c.id == color.id) {
            self.colors.push(color);
        }
    }

    /// 移除尺碼
    ///
    /// 連帶刪除該尺碼的所有儲存格；尺碼列表形狀改變後，
    /// 既存配比字串的位置對齊已失效，一併清除
    pub fn remove_size(&mut self, size: &str) {
        self.sizes.retain(|s| s != size);
        self.breakdown.retain(|key, _| key.size != size);
        self.ratios.clear();
    }

    /// 移除顏色，連帶刪除其儲存格與配比字串
    pub fn remove_color(&mut self, color_id: Uuid) {
        self.colors.retain(|c| c.id != color_id);
        self.breakdown.retain(|key, _| key.color_id != color_id);
        self.ratios.remove(&color_id);
    }

    /// 檢查尺碼是否已宣告
    pub fn contains_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// 檢查顏色是否已宣告
    pub fn contains_color(&self, color_id: Uuid) -> bool {
        self.colors.iter().any(|c| c.id == color_id)
    }

    /// 依ID查找顏色
    pub fn color(&self, color_id: Uuid) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == color_id)
    }

    /// 設置儲存格數量
    ///
    /// 寫入前檢查座標已宣告（讀取端則一律寬鬆預設 0）；
    /// 數量為 0 時移除儲存格，保持矩陣稀疏
    pub fn set_quantity(&mut self, color_id: Uuid, size: &str, quantity: u32) -> Result<()> {
        if !self.contains_color(color_id) || !self.contains_size(size) {
            return Err(PlanError::CellNotDeclared(format!(
                "{color_id}|{size} 不在尺碼組 {} 中",
                self.name
            )));
        }

        let key = CellKey::new(color_id, size.to_string());
        if quantity == 0 {
            self.breakdown.remove(&key);
        } else {
            self.breakdown.insert(key, quantity);
        }
        Ok(())
    }

    /// 讀取儲存格數量（未設定視為 0）
    pub fn quantity(&self, color_id: Uuid, size: &str) -> u32 {
        self.breakdown
            .get(&CellKey::new(color_id, size.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// 讀取某顏色的一列數量（按 `sizes` 順序）
    pub fn row_quantities(&self, color_id: Uuid) -> Vec<u32> {
        self.sizes
            .iter()
            .map(|size| self.quantity(color_id, size))
            .collect()
    }

    /// 本組總件數
    pub fn total_quantity(&self) -> u32 {
        self.breakdown.values().sum()
    }

    /// 某顏色的總件數
    pub fn quantity_for_color(&self, color_id: Uuid) -> u32 {
        self.breakdown
            .iter()
            .filter(|(key, _)| key.color_id == color_id)
            .map(|(_, &qty)| qty)
            .sum()
    }

    /// 某尺碼的總件數（跨所有顏色）
    pub fn quantity_for_size(&self, size: &str) -> u32 {
        self.breakdown
            .iter()
            .filter(|(key, _)| key.size == size)
            .map(|(_, &qty)| qty)
            .sum()
    }

    /// 本組全部儲存格座標（宣告的顏色 × 尺碼，含數量為 0 者）
    pub fn cell_keys(&self) -> Vec<CellKey> {
        let mut keys = Vec::with_capacity(self.colors.len() * self.sizes.len());
        for color in &self.colors {
            for size in &self.sizes {
                keys.push(CellKey::new(color.id, size.clone()));
            }
        }
        keys
    }

    /// 記錄某顏色最近套用的配比字串
    pub fn set_ratio(&mut self, color_id: Uuid, ratio: String) {
        self.ratios.insert(color_id, ratio);
    }

    /// 讀取某顏色的配比字串
    pub fn ratio_for_color(&self, color_id: Uuid) -> Option<&str> {
        self.ratios.get(&color_id).map(|s| s.as_str())
    }
}

/// 尺碼標籤排序：全部可解析為數字時按數值排序，否則按字典序
pub fn sort_size_labels(labels: &mut [String]) {
    let all_numeric = labels
        .iter()
        .all(|label| label.trim().parse::<u64>().is_ok());

    if all_numeric {
        labels.sort_by_key(|label| label.trim().parse::<u64>().unwrap_or(0));
    } else {
        labels.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_group() -> (SizeGroup, Uuid, Uuid) {
        let black = Color::new("黑色".to_string());
        let white = Color::new("白色".to_string());
        let black_id = black.id;
        let white_id = white.id;

        let group = SizeGroup::new("上衣".to_string())
            .with_sizes(vec![
                "S".to_string(),
                "M".to_string(),
                "L".to_string(),
                "XL".to_string(),
            ])
            .with_color(black)
            .with_color(white);

        (group, black_id, white_id)
    }

    #[test]
    fn test_set_and_read_quantity() {
        let (mut group, black, white) = sample_group();

        group.set_quantity(black, "S", 120).unwrap();
        group.set_quantity(black, "M", 60).unwrap();
        group.set_quantity(white, "L", 80).unwrap();

        assert_eq!(group.quantity(black, "S"), 120);
        assert_eq!(group.quantity(black, "M"), 60);
        // 未設定的儲存格預設 0
        assert_eq!(group.quantity(black, "L"), 0);
        assert_eq!(group.total_quantity(), 260);
        assert_eq!(group.quantity_for_color(black), 180);
        assert_eq!(group.quantity_for_size("L"), 80);
    }

    #[test]
    fn test_set_quantity_rejects_undeclared_cell() {
        let (mut group, black, _) = sample_group();

        // 未宣告的尺碼
        let result = group.set_quantity(black, "XXL", 10);
        assert!(matches!(result, Err(PlanError::CellNotDeclared(_))));

        // 未宣告的顏色
        let result = group.set_quantity(Uuid::new_v4(), "S", 10);
        assert!(matches!(result, Err(PlanError::CellNotDeclared(_))));
    }

    #[test]
    fn test_zero_quantity_removes_cell() {
        let (mut group, black, _) = sample_group();

        group.set_quantity(black, "S", 50).unwrap();
        assert_eq!(group.breakdown.len(), 1);

        group.set_quantity(black, "S", 0).unwrap();
        assert!(group.breakdown.is_empty());
        assert_eq!(group.quantity(black, "S"), 0);
    }

    #[test]
    fn test_row_quantities_follow_size_order() {
        let (mut group, black, _) = sample_group();

        group.set_quantity(black, "M", 60).unwrap();
        group.set_quantity(black, "XL", 180).unwrap();

        assert_eq!(group.row_quantities(black), vec![0, 60, 0, 180]);
    }

    #[test]
    fn test_duplicate_sizes_and_colors_ignored() {
        let (mut group, _, _) = sample_group();

        group.add_size("M".to_string());
        assert_eq!(group.sizes.len(), 4);

        let existing = group.colors[0].clone();
        group.add_color(existing);
        assert_eq!(group.colors.len(), 2);
    }

    #[test]
    fn test_remove_size_drops_cells_and_ratios() {
        let (mut group, black, _) = sample_group();

        group.set_quantity(black, "S", 40).unwrap();
        group.set_quantity(black, "M", 20).unwrap();
        group.set_ratio(black, "2:1:0:0".to_string());

        group.remove_size("S");

        assert!(!group.contains_size("S"));
        assert_eq!(group.quantity(black, "S"), 0);
        assert_eq!(group.quantity(black, "M"), 20);
        // 尺碼形狀改變，配比字串對齊失效
        assert!(group.ratio_for_color(black).is_none());
    }

    #[test]
    fn test_remove_color_drops_cells() {
        let (mut group, black, white) = sample_group();

        group.set_quantity(black, "S", 40).unwrap();
        group.set_quantity(white, "S", 30).unwrap();

        group.remove_color(black);

        assert!(!group.contains_color(black));
        assert_eq!(group.total_quantity(), 30);
    }

    #[rstest]
    #[case(vec!["100", "90", "110"], vec!["90", "100", "110"])] // 全數字按數值
    #[case(vec!["M", "L", "S"], vec!["L", "M", "S"])] // 含文字按字典序
    #[case(vec!["90", "M", "100"], vec!["100", "90", "M"])] // 混合退回字典序
    fn test_sort_size_labels(#[case] input: Vec<&str>, #[case] expected: Vec<&str>) {
        let mut labels: Vec<String> = input.into_iter().map(String::from).collect();
        sort_size_labels(&mut labels);
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_size_group_json_round_trip() {
        let (mut group, black, _) = sample_group();
        group.set_quantity(black, "S", 120).unwrap();
        group.set_ratio(black, "2:1:0:3".to_string());

        // CellKey 以字串鍵序列化，JSON 映射才合法
        let json = serde_json::to_string(&group).unwrap();
        let restored: SizeGroup = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, group.id);
        assert_eq!(restored.quantity(black, "S"), 120);
        assert_eq!(restored.ratio_for_color(black), Some("2:1:0:3"));
    }
}
