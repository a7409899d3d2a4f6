// ==========================================
// 商品目录导入 - 目录 Repository Trait
// ==========================================
// 职责: 定义按租户隔离的分类/商品数据访问接口（不包含实现）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::{Category, NewCategory, NewProduct, Product, TenantId};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// CatalogRepository Trait
// ==========================================
// 用途: 导入器与 API 层的数据存储接口
// 实现者: CatalogRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ===== 分类 =====

    /// 查询租户下全部分类（按创建顺序）
    async fn list_categories(&self, tenant: &TenantId) -> RepositoryResult<Vec<Category>>;

    /// 创建分类
    ///
    /// # 返回
    /// - Ok(Category): 已落库的分类（含生成的 id）
    /// - Err: 数据库错误（调用方决定是否中止）
    async fn insert_category(
        &self,
        tenant: &TenantId,
        category: NewCategory,
    ) -> RepositoryResult<Category>;

    /// 更新分类名称/颜色/图标
    ///
    /// # 返回
    /// - Err(NotFound): 分类不存在或不属于该租户
    async fn update_category(
        &self,
        tenant: &TenantId,
        category_id: &str,
        category: NewCategory,
    ) -> RepositoryResult<Category>;

    /// 删除分类（引用该分类的商品 category_id 置空）
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 分类不存在
    async fn delete_category(&self, tenant: &TenantId, category_id: &str)
        -> RepositoryResult<bool>;

    // ===== 商品 =====

    /// 批量插入商品（单事务，整体成功或整体失败）
    ///
    /// # 返回
    /// - Ok(usize): 插入的记录数
    /// - Err: 数据库错误（整个事务回滚）
    async fn batch_insert_products(
        &self,
        tenant: &TenantId,
        products: Vec<NewProduct>,
    ) -> RepositoryResult<usize>;

    /// 查询租户下全部商品（按创建顺序）
    async fn list_products(&self, tenant: &TenantId) -> RepositoryResult<Vec<Product>>;

    /// 上架/下架商品
    ///
    /// # 返回
    /// - Ok(true): 已更新
    /// - Ok(false): 商品不存在
    async fn set_product_active(
        &self,
        tenant: &TenantId,
        product_id: &str,
        is_active: bool,
    ) -> RepositoryResult<bool>;

    /// 统计租户下商品数
    async fn count_products(&self, tenant: &TenantId) -> RepositoryResult<usize>;
}
