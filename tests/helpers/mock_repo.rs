// ==========================================
// Mock 目录仓储 - 用于集成测试
// ==========================================
// 内存实现，可注入分类创建失败、批量插入失败与插入延迟
// ==========================================

use async_trait::async_trait;
use catalog_importer::domain::{Category, NewCategory, NewProduct, Product, TenantId};
use catalog_importer::repository::{CatalogRepository, RepositoryError, RepositoryResult};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    categories: Vec<Category>,
    products: Vec<Product>,
    failing_categories: HashSet<String>,
    insert_failure: Option<String>,
    insert_delay: Option<Duration>,
    category_insert_calls: usize,
    product_batches: Vec<usize>,
}

/// 克隆共享同一份内存状态
#[derive(Debug, Clone, Default)]
pub struct MockCatalogRepo {
    state: Arc<Mutex<State>>,
}

impl MockCatalogRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置已存在的分类
    pub fn with_category(self, tenant: &TenantId, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.categories.push(Category {
                id: Uuid::new_v4().to_string(),
                business_id: tenant.as_str().to_string(),
                name: name.to_string(),
                color: "#000000".to_string(),
                icon: "box".to_string(),
                created_at: Utc::now(),
            });
        }
        self
    }

    /// 指定名称（大小写不敏感）的分类创建失败
    pub fn fail_category(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_categories
            .insert(name.to_lowercase());
        self
    }

    /// 批量插入商品失败，错误文本为 message
    pub fn fail_insert(self, message: &str) -> Self {
        self.state.lock().unwrap().insert_failure = Some(message.to_string());
        self
    }

    /// 批量插入前挂起指定时长（模拟慢存储）
    pub fn delay_insert(self, delay: Duration) -> Self {
        self.state.lock().unwrap().insert_delay = Some(delay);
        self
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.lock().unwrap().categories.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.lock().unwrap().products.clone()
    }

    pub fn category_insert_calls(&self) -> usize {
        self.state.lock().unwrap().category_insert_calls
    }

    /// 每次批量插入提交的商品数
    pub fn product_batches(&self) -> Vec<usize> {
        self.state.lock().unwrap().product_batches.clone()
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepo {
    async fn list_categories(&self, tenant: &TenantId) -> RepositoryResult<Vec<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .filter(|c| c.business_id == tenant.as_str())
            .cloned()
            .collect())
    }

    async fn insert_category(
        &self,
        tenant: &TenantId,
        category: NewCategory,
    ) -> RepositoryResult<Category> {
        let mut state = self.state.lock().unwrap();
        state.category_insert_calls += 1;

        if state.failing_categories.contains(&category.name.to_lowercase()) {
            return Err(RepositoryError::DatabaseQueryError(format!(
                "cannot create category {}",
                category.name
            )));
        }

        let created = Category {
            id: Uuid::new_v4().to_string(),
            business_id: tenant.as_str().to_string(),
            name: category.name,
            color: category.color,
            icon: category.icon,
            created_at: Utc::now(),
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    async fn update_category(
        &self,
        tenant: &TenantId,
        category_id: &str,
        category: NewCategory,
    ) -> RepositoryResult<Category> {
        let mut state = self.state.lock().unwrap();
        let existing = state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id && c.business_id == tenant.as_str())
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Category".to_string(),
                id: category_id.to_string(),
            })?;
        existing.name = category.name;
        existing.color = category.color;
        existing.icon = category.icon;
        Ok(existing.clone())
    }

    async fn delete_category(&self, tenant: &TenantId, category_id: &str) -> RepositoryResult<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.categories.len();
        state
            .categories
            .retain(|c| !(c.id == category_id && c.business_id == tenant.as_str()));
        let deleted = state.categories.len() != before;
        if deleted {
            for product in state.products.iter_mut() {
                if product.category_id.as_deref() == Some(category_id) {
                    product.category_id = None;
                }
            }
        }
        Ok(deleted)
    }

    async fn batch_insert_products(
        &self,
        tenant: &TenantId,
        products: Vec<NewProduct>,
    ) -> RepositoryResult<usize> {
        let delay = self.state.lock().unwrap().insert_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.product_batches.push(products.len());

        if let Some(message) = state.insert_failure.clone() {
            return Err(RepositoryError::DatabaseQueryError(message));
        }

        let count = products.len();
        let now = Utc::now();
        for p in products {
            state.products.push(Product {
                id: Uuid::new_v4().to_string(),
                business_id: tenant.as_str().to_string(),
                name: p.name,
                category_id: p.category_id,
                selling_price: p.selling_price,
                cost_price: p.cost_price,
                stock_quantity: p.stock_quantity,
                low_stock_threshold: p.low_stock_threshold,
                is_active: p.is_active,
                created_at: now,
            });
        }
        Ok(count)
    }

    async fn list_products(&self, tenant: &TenantId) -> RepositoryResult<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| p.business_id == tenant.as_str())
            .cloned()
            .collect())
    }

    async fn set_product_active(
        &self,
        tenant: &TenantId,
        product_id: &str,
        is_active: bool,
    ) -> RepositoryResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state
            .products
            .iter_mut()
            .find(|p| p.id == product_id && p.business_id == tenant.as_str())
        {
            Some(product) => {
                product.is_active = is_active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_products(&self, tenant: &TenantId) -> RepositoryResult<usize> {
        Ok(self.list_products(tenant).await?.len())
    }
}
