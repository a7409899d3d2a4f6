// ==========================================
// 商品目录导入 - 分类领域模型
// ==========================================
// 用途: 租户内商品分类，导入时按名称对账
// 约束: 名称唯一性不在客户端强制（仅大小写不敏感查找）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Category - 已持久化的分类
// ==========================================
// 对齐: categories 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,                 // 分类 ID（UUID）
    pub business_id: String,        // 所属租户
    pub name: String,               // 分类名称（保留原始大小写）
    pub color: String,              // 展示颜色
    pub icon: String,               // 展示图标
    pub created_at: DateTime<Utc>,  // 创建时间
}

// ==========================================
// NewCategory - 分类创建载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl NewCategory {
    /// 以模板的颜色/图标创建指定名称的分类载荷
    pub fn named(name: &str, template: &NewCategory) -> Self {
        Self {
            name: name.to_string(),
            color: template.color.clone(),
            icon: template.icon.clone(),
        }
    }
}
