// ==========================================
// 商品目录导入 - 商品领域模型
// ==========================================
// 约束: category_id 为空（未分类）或指向同租户内已存在的分类
// 说明: 导入不对已有商品去重，重复导入会产生重复商品
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Product - 已持久化的商品
// ==========================================
// 对齐: products 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,                     // 商品 ID（UUID）
    pub business_id: String,            // 所属租户
    pub name: String,                   // 商品名称
    pub category_id: Option<String>,    // 分类 ID（None = 未分类）
    pub selling_price: f64,             // 售价
    pub cost_price: f64,                // 成本价
    pub stock_quantity: i64,            // 库存数量
    pub low_stock_threshold: i64,       // 低库存预警阈值
    pub is_active: bool,                // 是否上架
    pub created_at: DateTime<Utc>,      // 创建时间
}

// ==========================================
// NewProduct - 商品批量插入载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category_id: Option<String>,
    pub selling_price: f64,
    pub cost_price: f64,
    pub stock_quantity: i64,
    pub low_stock_threshold: i64,
    pub is_active: bool,
}
