//! 配比計算（歸約與分配）

use gop_core::{PlanError, Result, SizeGroup};
use uuid::Uuid;

/// 配比計算器
pub struct RatioDistributor;

impl RatioDistributor {
    /// 將一列數量歸約為最簡配比字串
    ///
    /// 取非零值的最大公因數後逐項相除，以 `:` 串接；
    /// 零值保留原位，維持與尺碼列表的位置對齊。
    /// 全零輸入無法定義配比，回傳空字串
    pub fn reduce_to_ratio(quantities: &[u32]) -> String {
        let divisor = quantities
            .iter()
            .copied()
            .filter(|&qty| qty > 0)
            .fold(0, gcd);

        if divisor == 0 {
            return String::new();
        }

        quantities
            .iter()
            .map(|&qty| (qty / divisor).to_string())
            .collect::<Vec<_>>()
            .join(":")
    }

    /// 解析配比字串為權重列表
    pub fn parse_ratio(ratio: &str) -> Result<Vec<u32>> {
        ratio
            .split(':')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .map_err(|_| PlanError::RatioParse(ratio.to_string()))
            })
            .collect()
    }

    /// 按配比權重分配目標總量
    ///
    /// 除最後一項外逐項向下取整，最後一項吸收全部捨入餘數，
    /// 保證分配總和精確等於目標總量。代價是最後一個尺碼
    /// 不是嚴格按比例的，呼叫端須知悉。
    /// 權重全為零時分配無定義，回傳 `InvalidRatio`
    pub fn distribute(weights: &[u32], target_total: u32) -> Result<Vec<u32>> {
        let weight_sum: u64 = weights.iter().map(|&w| w as u64).sum();
        if weight_sum == 0 {
            return Err(PlanError::InvalidRatio);
        }

        let mut quantities = Vec::with_capacity(weights.len());
        let mut assigned: u64 = 0;

        for (index, &weight) in weights.iter().enumerate() {
            if index + 1 == weights.len() {
                quantities.push((target_total as u64 - assigned) as u32);
            } else {
                let qty = weight as u64 * target_total as u64 / weight_sum;
                assigned += qty;
                quantities.push(qty as u32);
            }
        }

        Ok(quantities)
    }

    /// 將同一組配比套用到多個顏色
    ///
    /// 權重與 `group.sizes` 按位置對齊；每個選取的顏色獨立寫入
    /// 一份相同的分配結果，並記錄歸約後的配比字串供回顯
    pub fn apply_to_colors(
        group: &mut SizeGroup,
        color_ids: &[Uuid],
        weights: &[u32],
        target_total: u32,
    ) -> Result<()> {
        if weights.len() != group.sizes.len() {
            return Err(PlanError::RatioLengthMismatch {
                weights: weights.len(),
                sizes: group.sizes.len(),
            });
        }

        let quantities = Self::distribute(weights, target_total)?;
        let ratio = Self::reduce_to_ratio(weights);
        let sizes = group.sizes.clone();

        for &color_id in color_ids {
            for (size, &qty) in sizes.iter().zip(quantities.iter()) {
                group.set_quantity(color_id, size, qty)?;
            }
            group.set_ratio(color_id, ratio.clone());
        }

        Ok(())
    }
}

/// 最大公因數（輾轉相除）
fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
