// ==========================================
// 商品目录导入 - 目录 Repository 实现
// ==========================================
// 职责: 实现按租户隔离的分类/商品数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::{Category, NewCategory, NewProduct, Product, TenantId};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const CATEGORY_COLUMNS: &str = "id, business_id, name, color, icon, created_at";
const PRODUCT_COLUMNS: &str = "id, business_id, name, category_id, selling_price, cost_price, \
     stock_quantity, low_stock_threshold, is_active, created_at";

fn map_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        business_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
        icon: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn map_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        business_id: row.get(1)?,
        name: row.get(2)?,
        category_id: row.get(3)?,
        selling_price: row.get(4)?,
        cost_price: row.get(5)?,
        stock_quantity: row.get(6)?,
        low_stock_threshold: row.get(7)?,
        is_active: row.get::<_, i64>(8)? != 0,
        created_at: row.get(9)?,
    })
}

// ==========================================
// CatalogRepositoryImpl
// ==========================================
pub struct CatalogRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepositoryImpl {
    /// 从已有连接创建（测试与 CLI 共享连接时使用）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn get_category(
        conn: &Connection,
        tenant: &TenantId,
        category_id: &str,
    ) -> RepositoryResult<Option<Category>> {
        let sql = format!(
            "SELECT {} FROM categories WHERE business_id = ?1 AND id = ?2",
            CATEGORY_COLUMNS
        );
        let category = conn
            .query_row(&sql, params![tenant.as_str(), category_id], map_category)
            .optional()?;
        Ok(category)
    }

    /// 在事务中批量插入商品
    fn batch_insert_products_tx(
        tx: &Transaction,
        tenant: &TenantId,
        products: &[NewProduct],
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO products (
                id, business_id, name, category_id, selling_price, cost_price,
                stock_quantity, low_stock_threshold, is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )?;

        let now = Utc::now();
        let mut count = 0;
        for product in products {
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                tenant.as_str(),
                product.name,
                product.category_id,
                product.selling_price,
                product.cost_price,
                product.stock_quantity,
                product.low_stock_threshold,
                product.is_active as i32,
                now,
            ])?;
            count += 1;
        }

        Ok(count)
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn list_categories(&self, tenant: &TenantId) -> RepositoryResult<Vec<Category>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM categories WHERE business_id = ?1 ORDER BY created_at, rowid",
            CATEGORY_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![tenant.as_str()], map_category)?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }

    async fn insert_category(
        &self,
        tenant: &TenantId,
        category: NewCategory,
    ) -> RepositoryResult<Category> {
        if category.name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "分类名称不能为空".to_string(),
            ));
        }

        let conn = self.lock()?;
        let created = Category {
            id: Uuid::new_v4().to_string(),
            business_id: tenant.as_str().to_string(),
            name: category.name,
            color: category.color,
            icon: category.icon,
            created_at: Utc::now(),
        };

        conn.execute(
            "INSERT INTO categories (id, business_id, name, color, icon, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                created.id,
                created.business_id,
                created.name,
                created.color,
                created.icon,
                created.created_at,
            ],
        )?;

        Ok(created)
    }

    async fn update_category(
        &self,
        tenant: &TenantId,
        category_id: &str,
        category: NewCategory,
    ) -> RepositoryResult<Category> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "UPDATE categories SET name = ?3, color = ?4, icon = ?5
             WHERE business_id = ?1 AND id = ?2",
            params![
                tenant.as_str(),
                category_id,
                category.name,
                category.color,
                category.icon
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Category".to_string(),
                id: category_id.to_string(),
            });
        }

        Self::get_category(&conn, tenant, category_id)?.ok_or_else(|| RepositoryError::NotFound {
            entity: "Category".to_string(),
            id: category_id.to_string(),
        })
    }

    async fn delete_category(
        &self,
        tenant: &TenantId,
        category_id: &str,
    ) -> RepositoryResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "DELETE FROM categories WHERE business_id = ?1 AND id = ?2",
            params![tenant.as_str(), category_id],
        )?;
        Ok(affected > 0)
    }

    async fn batch_insert_products(
        &self,
        tenant: &TenantId,
        products: Vec<NewProduct>,
    ) -> RepositoryResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let count = Self::batch_insert_products_tx(&tx, tenant, &products)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    async fn list_products(&self, tenant: &TenantId) -> RepositoryResult<Vec<Product>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM products WHERE business_id = ?1 ORDER BY created_at, rowid",
            PRODUCT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![tenant.as_str()], map_product)?;

        let mut products = Vec::new();
        for row in rows {
            products.push(row?);
        }
        Ok(products)
    }

    async fn set_product_active(
        &self,
        tenant: &TenantId,
        product_id: &str,
        is_active: bool,
    ) -> RepositoryResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "UPDATE products SET is_active = ?3 WHERE business_id = ?1 AND id = ?2",
            params![tenant.as_str(), product_id, is_active as i32],
        )?;
        Ok(affected > 0)
    }

    async fn count_products(&self, tenant: &TenantId) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM products WHERE business_id = ?1",
            params![tenant.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
