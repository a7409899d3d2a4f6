// ==========================================
// 商品目录导入 - 示例数据写入
// ==========================================
// 用途: 为商户写入一份演示用商品目录（CLI `seed` 命令）
// 约束: 可重复执行，已存在的分类/商品名称（大小写不敏感）不会重复写入
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::{NewCategory, NewProduct, TenantId};
use crate::importer::{resolve_or_create, ImportError, ImportResult};
use crate::repository::CatalogRepository;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, instrument};

/// 示例商品: (名称, 分类, 售价, 成本价, 库存)
const DEMO_PRODUCTS: &[(&str, &str, f64, f64, i64)] = &[
    ("Espresso Beans 1kg", "Beverages", 24.0, 15.5, 40),
    ("Green Tea 100 bags", "Beverages", 8.5, 4.2, 120),
    ("Sparkling Water 6-pack", "Beverages", 5.99, 3.1, 60),
    ("Dark Chocolate Bar", "Snacks", 2.49, 1.1, 200),
    ("Salted Almonds 250g", "Snacks", 6.75, 3.9, 35),
    ("Dish Soap 500ml", "Household", 3.2, 1.6, 8),
    ("Paper Towels 4-roll", "Household", 4.99, 2.8, 25),
    ("AA Batteries 8-pack", "Electronics", 9.99, 5.4, 15),
    ("USB-C Cable 1m", "Electronics", 7.5, 2.3, 5),
];

/// 写入结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub categories_created: usize,
    pub categories_existing: usize,
    pub products_inserted: usize,
    pub products_existing: usize,
}

/// 为商户写入示例目录
///
/// # 说明
/// - 分类复用导入流程的对账逻辑（先读已有分类，再顺序补建）
/// - 商品按名称去重后一次批量插入
#[instrument(skip(repo, config), fields(tenant = %tenant))]
pub async fn seed_demo_catalog<R, C>(
    repo: &R,
    tenant: &TenantId,
    config: &C,
) -> ImportResult<SeedSummary>
where
    R: CatalogRepository + ?Sized,
    C: ImportConfigReader + ?Sized,
{
    let mut category_names: Vec<String> = Vec::new();
    for (_, category, ..) in DEMO_PRODUCTS {
        if !category_names.iter().any(|c| c == category) {
            category_names.push(category.to_string());
        }
    }

    let template: NewCategory = config.get_new_category_template().await?;
    let threshold = config.get_default_low_stock_threshold().await?;
    let resolution = resolve_or_create(repo, tenant, &category_names, &template).await?;

    if let Some(failure) = resolution.failures.first() {
        return Err(ImportError::InternalError(format!(
            "示例分类创建失败: {} ({})",
            failure.name, failure.reason
        )));
    }

    let existing_names: HashSet<String> = repo
        .list_products(tenant)
        .await?
        .into_iter()
        .map(|p| p.name.to_lowercase())
        .collect();

    let batch: Vec<NewProduct> = DEMO_PRODUCTS
        .iter()
        .filter(|(name, ..)| !existing_names.contains(&name.to_lowercase()))
        .map(|&(name, category, selling_price, cost_price, stock)| NewProduct {
            name: name.to_string(),
            category_id: resolution.map.resolve(category).map(str::to_string),
            selling_price,
            cost_price,
            stock_quantity: stock,
            low_stock_threshold: threshold,
            is_active: true,
        })
        .collect();

    let products_existing = DEMO_PRODUCTS.len() - batch.len();
    let products_inserted = if batch.is_empty() {
        0
    } else {
        repo.batch_insert_products(tenant, batch)
            .await
            .map_err(|e| ImportError::InsertFailed(e.to_string()))?
    };

    let summary = SeedSummary {
        categories_created: resolution.created.len(),
        categories_existing: category_names.len() - resolution.created.len(),
        products_inserted,
        products_existing,
    };
    info!(?summary, "示例数据写入完成");
    Ok(summary)
}
