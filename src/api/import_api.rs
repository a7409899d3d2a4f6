// ==========================================
// 商品目录导入 - 导入API
// ==========================================
// 职责: 面向界面的导入入口
// 流程: 忙碌标记 → 开始通知 → 导入 → 成功通知 + 缓存失效 / 失败通知
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::{Category, CategoryFailure, ImportSummary, Product, TenantId};
use crate::events::{cache_keys, default_sinks, CacheInvalidator, Notifier};
use crate::i18n::{t, t_with_args};
use crate::importer::{ImportError, ImportGate, ProductImporter, ProductImporterImpl};
use crate::repository::{CatalogRepository, CatalogRepositoryImpl};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 导入的商品数量
    pub imported: usize,
    /// 因缺少名称被跳过的行数
    pub skipped: usize,
    /// 本次新建的分类
    pub categories_created: Vec<Category>,
    /// 创建失败的分类（相关商品归为未分类）
    pub category_failures: Vec<CategoryFailure>,
    /// 未分类的商品数量
    pub uncategorized: usize,
    /// 批次ID
    pub batch_id: String,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
    /// 面向用户的结果说明
    pub message: String,
}

impl ImportApiResponse {
    fn from_summary(summary: ImportSummary, message: String) -> Self {
        Self {
            imported: summary.imported,
            skipped: summary.skipped_rows,
            categories_created: summary.categories_created,
            category_failures: summary.category_failures,
            uncategorized: summary.uncategorized,
            batch_id: summary.batch_id,
            elapsed_ms: summary.elapsed.as_millis() as i64,
            message,
        }
    }
}

/// 导入API
pub struct ImportApi<R = CatalogRepositoryImpl, C = ConfigManager>
where
    R: CatalogRepository,
    C: ImportConfigReader,
{
    importer: ProductImporterImpl<R, C>,
    gate: ImportGate,
    notifier: Arc<dyn Notifier>,
    cache: Arc<dyn CacheInvalidator>,
}

impl ImportApi<CatalogRepositoryImpl, ConfigManager> {
    /// 基于 SQLite 数据库创建 ImportApi（仓储与配置共享同一连接）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn open(db_path: &str) -> ApiResult<Self> {
        let (notifier, cache) = default_sinks();
        Self::open_with_sinks(db_path, notifier, cache)
    }

    /// 打开数据库并补齐表结构（幂等），使用给定的通知与缓存出口
    pub fn open_with_sinks(
        db_path: &str,
        notifier: Arc<dyn Notifier>,
        cache: Arc<dyn CacheInvalidator>,
    ) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseError(format!("打开数据库失败: {}", e)))?;
        init_schema(&conn)
            .map_err(|e| ApiError::DatabaseError(format!("数据库表结构初始化失败: {}", e)))?;
        Self::from_connection(Arc::new(Mutex::new(conn)), notifier, cache)
    }

    /// 从已有连接创建（与 AppState 等共享连接）
    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
        notifier: Arc<dyn Notifier>,
        cache: Arc<dyn CacheInvalidator>,
    ) -> ApiResult<Self> {
        let repo = CatalogRepositoryImpl::from_connection(conn.clone())?;
        let config = ConfigManager::from_connection(conn)?;

        Ok(Self::new(
            ProductImporterImpl::with_defaults(repo, config),
            notifier,
            cache,
        ))
    }
}

impl<R, C> ImportApi<R, C>
where
    R: CatalogRepository,
    C: ImportConfigReader,
{
    /// 创建新的ImportApi实例
    pub fn new(
        importer: ProductImporterImpl<R, C>,
        notifier: Arc<dyn Notifier>,
        cache: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            importer,
            gate: ImportGate::new(),
            notifier,
            cache,
        }
    }

    /// 导入是否正在进行（界面据此禁用导入按钮）
    pub fn is_importing(&self) -> bool {
        self.gate.is_busy()
    }

    /// 忙碌标记（与其他入口共享时使用）
    pub fn gate(&self) -> &ImportGate {
        &self.gate
    }

    /// 导入商品文件
    ///
    /// # 参数
    /// - business_id: 商户标识
    /// - file_path: 文件路径（.xlsx/.xls/.xlsm/.ods/.csv）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果
    /// - Err(ApiError): 错误信息（已通过 notifier 告知用户）
    pub async fn import_products(
        &self,
        business_id: &str,
        file_path: &str,
    ) -> ApiResult<ImportApiResponse> {
        let display_name = Path::new(file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_path)
            .to_string();

        self.run_import(business_id, &display_name, move |tenant| async move {
            self.importer
                .import_file(&tenant, Path::new(file_path))
                .await
        })
        .await
    }

    /// 导入上传的文件内容
    ///
    /// # 参数
    /// - business_id: 商户标识
    /// - file_name: 原始文件名（用于判断格式）
    /// - bytes: 文件内容
    pub async fn import_products_from_bytes(
        &self,
        business_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> ApiResult<ImportApiResponse> {
        self.run_import(business_id, file_name, move |tenant| async move {
            self.importer.import_bytes(&tenant, file_name, bytes).await
        })
        .await
    }

    /// 列出商户的全部分类
    pub async fn list_categories(&self, business_id: &str) -> ApiResult<Vec<Category>> {
        let tenant = parse_tenant(business_id)?;
        Ok(self.importer.repository().list_categories(&tenant).await?)
    }

    /// 列出商户的全部商品
    pub async fn list_products(&self, business_id: &str) -> ApiResult<Vec<Product>> {
        let tenant = parse_tenant(business_id)?;
        Ok(self.importer.repository().list_products(&tenant).await?)
    }

    async fn run_import<F, Fut>(
        &self,
        business_id: &str,
        display_name: &str,
        run: F,
    ) -> ApiResult<ImportApiResponse>
    where
        F: FnOnce(TenantId) -> Fut,
        Fut: std::future::Future<Output = Result<ImportSummary, ImportError>>,
    {
        let tenant = match TenantId::new(business_id) {
            Some(tenant) => tenant,
            None => {
                let message = t("import.missing_business");
                self.notifier.error(&message);
                return Err(ApiError::InvalidInput(message));
            }
        };

        // 许可在本函数返回时释放（成功/失败均复位）
        let _permit = match self.gate.try_acquire() {
            Ok(permit) => permit,
            Err(e) => {
                self.notifier.error(&failure_message(&e));
                return Err(e.into());
            }
        };

        self.notifier
            .info(&t_with_args("import.started", &[("file", display_name)]));

        match run(tenant).await {
            Ok(summary) => {
                let message = success_message(&summary);
                self.notifier.success(&message);
                self.cache.invalidate(cache_keys::AFTER_IMPORT);
                Ok(ImportApiResponse::from_summary(summary, message))
            }
            Err(e) => {
                tracing::error!(error = %e, file = display_name, "导入失败");
                self.notifier.error(&failure_message(&e));
                Err(e.into())
            }
        }
    }
}

fn parse_tenant(business_id: &str) -> ApiResult<TenantId> {
    TenantId::new(business_id).ok_or_else(|| ApiError::InvalidInput(t("import.missing_business")))
}

fn success_message(summary: &ImportSummary) -> String {
    let count = summary.imported.to_string();
    if summary.categories_created.is_empty() {
        t_with_args("import.success", &[("count", &count)])
    } else {
        let categories = summary.categories_created.len().to_string();
        t_with_args(
            "import.success_with_categories",
            &[("count", &count), ("categories", &categories)],
        )
    }
}

/// 失败提示文案（插入失败时附带存储层原始错误文本）
fn failure_message(err: &ImportError) -> String {
    match err {
        ImportError::Busy => t("import.busy"),
        ImportError::EmptyFile => t("import.empty_file"),
        ImportError::NoValidRows => t("import.no_valid_rows"),
        ImportError::FileNotFound(path) => t_with_args("import.file_not_found", &[("path", path)]),
        other => t_with_args("import.failed", &[("reason", &other.to_string())]),
    }
}
