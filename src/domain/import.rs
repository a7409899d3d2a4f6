// ==========================================
// 商品目录导入 - 导入管道中间结构
// ==========================================
// 生命周期: RawRow / NormalizedProduct 仅存在于单次导入调用内
// ==========================================

use crate::domain::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// 原始行记录（列名 → 单元格文本），列名随源文件变化
pub type RawRow = HashMap<String, String>;

// ==========================================
// NormalizedProduct - 归一化后的商品行
// ==========================================
// 用途: 字段映射产物，未落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub name: String,               // 非空
    pub category_name: String,      // 缺省为 "Uncategorized"
    pub selling_price: f64,
    pub cost_price: f64,
    pub stock_quantity: i64,        // >= 0
    pub low_stock_threshold: i64,   // >= 0，缺省 10
    pub row_number: usize,          // 源文件数据行号（从 1 开始）
}

// ==========================================
// CategoryFailure - 单个分类创建失败
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFailure {
    pub name: String,
    pub reason: String,
}

// ==========================================
// ImportSummary - 单次导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,                       // 导入批次 ID（仅用于日志追溯）
    pub total_rows: usize,                      // 解析出的数据行数
    pub valid_rows: usize,                      // 名称非空的行数
    pub skipped_rows: usize,                    // 因名称为空被丢弃的行数
    pub imported: usize,                        // 实际插入的商品数
    pub categories_created: Vec<Category>,      // 本次新建的分类
    pub category_failures: Vec<CategoryFailure>, // 创建失败的分类（对应行归为未分类）
    pub uncategorized: usize,                   // category_id 为空的商品数
    pub elapsed: Duration,                      // 导入耗时
}
