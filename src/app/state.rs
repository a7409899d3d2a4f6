// ==========================================
// 商品目录导入 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享连接与API实例
// ==========================================

use std::sync::{Arc, Mutex};

use anyhow::Context;
use rusqlite::Connection;

use crate::api::ImportApi;
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::events::{CacheInvalidator, Notifier};
use crate::repository::CatalogRepositoryImpl;

/// 应用状态
///
/// 仓储、配置与导入API共享同一个数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 目录仓储
    pub catalog_repo: Arc<CatalogRepositoryImpl>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 商品导入API
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// 创建新的AppState实例（打开数据库并初始化表结构）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - notifier / cache: 界面侧的通知与缓存实现
    pub fn new(
        db_path: String,
        notifier: Arc<dyn Notifier>,
        cache: Arc<dyn CacheInvalidator>,
    ) -> anyhow::Result<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .with_context(|| format!("无法打开数据库: {}", db_path))?;
        init_schema(&conn).context("数据库表结构初始化失败")?;
        let conn: Arc<Mutex<Connection>> = Arc::new(Mutex::new(conn));

        let catalog_repo = Arc::new(CatalogRepositoryImpl::from_connection(conn.clone())?);
        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone())?);
        let import_api = Arc::new(
            ImportApi::from_connection(conn, notifier, cache)
                .map_err(|e| anyhow::anyhow!("导入API初始化失败: {}", e))?,
        );

        tracing::info!("AppState初始化完成");
        Ok(Self {
            db_path,
            catalog_repo,
            config_manager,
            import_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 顺序: 环境变量 CATALOG_IMPORTER_DB_PATH → 用户数据目录 → ./catalog.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("CATALOG_IMPORTER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./catalog.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("catalog-importer");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("catalog.db");
        }
    }

    path.to_string_lossy().to_string()
}
