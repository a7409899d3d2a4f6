// ==========================================
// 商品目录导入 - 分类对账
// ==========================================
// 职责: 分类名称 → 分类 ID 的解析，缺失分类按需创建
// 两阶段:
//   1. 以租户现有分类初始化解析表（原样名称 + 小写名称）
//   2. 顺序创建未知分类，成功后回填解析表
// 约束: 对账在商品构建与批量插入之前全部完成
// ==========================================

use crate::domain::{Category, CategoryFailure, NewCategory, NormalizedProduct, TenantId};
use crate::importer::error::ImportResult;
use crate::repository::CatalogRepository;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

// ==========================================
// CategoryResolutionMap - 分类解析表
// ==========================================
// 生命周期: 单次导入内构建，导入结束即丢弃
#[derive(Debug, Clone, Default)]
pub struct CategoryResolutionMap {
    exact: HashMap<String, String>,
    lower: HashMap<String, String>,
}

impl CategoryResolutionMap {
    /// 以已有分类初始化
    ///
    /// 同一小写名称被多个分类占用时，小写键保留先出现者，原样名称键仍可精确命中
    pub fn seed(categories: &[Category]) -> Self {
        let mut map = Self::default();
        for category in categories {
            map.insert(&category.name, &category.id);
        }
        map
    }

    pub fn insert(&mut self, name: &str, id: &str) {
        self.exact.insert(name.to_string(), id.to_string());
        self.lower
            .entry(name.to_lowercase())
            .or_insert_with(|| id.to_string());
    }

    /// 大小写不敏感的存在性检查
    pub fn contains(&self, name: &str) -> bool {
        self.lower.contains_key(&name.to_lowercase())
    }

    /// 解析顺序: 小写查找 → 原样查找 → None
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.lower
            .get(&name.to_lowercase())
            .or_else(|| self.exact.get(name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

/// 收集被引用的分类名称（去重，保持首次出现顺序）
pub fn distinct_category_names(products: &[NormalizedProduct]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|p| seen.insert(p.category_name.as_str()))
        .map(|p| p.category_name.clone())
        .collect()
}

// ==========================================
// CategoryResolution - 对账结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CategoryResolution {
    pub map: CategoryResolutionMap,
    pub created: Vec<Category>,
    pub failures: Vec<CategoryFailure>,
}

/// 解析或创建分类
///
/// # 参数
/// - repo: 目录仓储
/// - tenant: 租户
/// - names: 本次导入引用的分类名称
/// - template: 新建分类的颜色/图标模板
///
/// # 返回
/// - Ok(CategoryResolution): 解析表 + 新建分类 + 创建失败列表
/// - Err: 读取现有分类失败（此时尚未发生任何写入）
///
/// # 说明
/// - 单个分类创建失败只记录并跳过，不中止导入
/// - 分类按顺序逐个创建，不并发
pub async fn resolve_or_create<R>(
    repo: &R,
    tenant: &TenantId,
    names: &[String],
    template: &NewCategory,
) -> ImportResult<CategoryResolution>
where
    R: CatalogRepository + ?Sized,
{
    // === 阶段 1: 以现有分类初始化 ===
    let existing = repo.list_categories(tenant).await?;
    let mut map = CategoryResolutionMap::seed(&existing);
    debug!(existing = existing.len(), "分类解析表初始化完成");

    // === 阶段 2: 顺序创建缺失分类 ===
    let mut created = Vec::new();
    let mut failures = Vec::new();
    for name in names {
        if map.contains(name) {
            continue;
        }

        match repo
            .insert_category(tenant, NewCategory::named(name, template))
            .await
        {
            Ok(category) => {
                debug!(category_id = %category.id, name = %category.name, "分类已创建");
                map.insert(&category.name, &category.id);
                created.push(category);
            }
            Err(e) => {
                warn!(name = %name, error = %e, "分类创建失败，相关商品将归为未分类");
                failures.push(CategoryFailure {
                    name: name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        referenced = names.len(),
        created = created.len(),
        failed = failures.len(),
        "分类对账完成"
    );

    Ok(CategoryResolution {
        map,
        created,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            business_id: "biz".to_string(),
            name: name.to_string(),
            color: "#000".to_string(),
            icon: "box".to_string(),
            created_at: Utc::now(),
        }
    }

    fn product(category_name: &str) -> NormalizedProduct {
        NormalizedProduct {
            name: "p".to_string(),
            category_name: category_name.to_string(),
            selling_price: 0.0,
            cost_price: 0.0,
            stock_quantity: 0,
            low_stock_threshold: 10,
            row_number: 1,
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let map = CategoryResolutionMap::seed(&[category("c1", "electronics")]);
        assert_eq!(map.resolve("Electronics"), Some("c1"));
        assert_eq!(map.resolve("ELECTRONICS"), Some("c1"));
        assert!(map.contains("Electronics"));
        assert_eq!(map.resolve("Toys"), None);
    }

    #[test]
    fn test_lowercase_key_keeps_first_claimant() {
        let map = CategoryResolutionMap::seed(&[category("c1", "Tools"), category("c2", "TOOLS")]);

        // 小写键归属先出现的分类
        assert_eq!(map.resolve("tools"), Some("c1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_distinct_names_keep_first_appearance() {
        let names = distinct_category_names(&[
            product("Tools"),
            product("Garden"),
            product("Tools"),
            product("tools"),
        ]);
        assert_eq!(names, vec!["Tools", "Garden", "tools"]);
    }
}
