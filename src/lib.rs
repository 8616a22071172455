//! # GOP — 成衣訂單規劃核心
//!
//! Facade crate：統一 re-export 資料模型（gop-core）與計算引擎（gop-calc）

pub use gop_calc::*;
pub use gop_core::*;
