// ==========================================
// 商品目录导入 - 通知与缓存失效
// ==========================================
// 职责: 定义导入结果通知与缓存失效 trait，实现依赖倒置
// 说明: API 层只依赖 trait，界面/宿主提供具体实现
// ==========================================

use std::sync::Arc;

/// 导入成功后需要失效的缓存键
pub mod cache_keys {
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "categories";

    /// 导入成功后一并失效的全部键
    pub const AFTER_IMPORT: &[&str] = &[PRODUCTS, CATEGORIES];
}

// ==========================================
// 用户通知 Trait
// ==========================================

/// 面向用户的消息通知（对应界面上的 toast）
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);

    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

/// 写入日志的通知实现（CLI 与无界面场景）
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!(target: "catalog_importer::notify", "{}", message);
    }

    fn success(&self, message: &str) {
        tracing::info!(target: "catalog_importer::notify", outcome = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "catalog_importer::notify", "{}", message);
    }
}

// ==========================================
// 缓存失效 Trait
// ==========================================

/// 查询缓存失效
///
/// # 实现说明
/// - 宿主界面持有商品/分类列表缓存时实现此 trait
/// - 仅在导入成功后调用
pub trait CacheInvalidator: Send + Sync {
    fn invalidate(&self, keys: &[&str]);
}

/// 空操作缓存失效器
///
/// 用于没有查询缓存的场景（CLI、单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoopCacheInvalidator;

impl CacheInvalidator for NoopCacheInvalidator {
    fn invalidate(&self, keys: &[&str]) {
        tracing::debug!(?keys, "NoopCacheInvalidator: 跳过缓存失效");
    }
}

/// 默认组合：日志通知 + 空缓存
pub fn default_sinks() -> (Arc<dyn Notifier>, Arc<dyn CacheInvalidator>) {
    (Arc::new(TracingNotifier), Arc::new(NoopCacheInvalidator))
}
