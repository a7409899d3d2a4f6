// ==========================================
// 商品目录导入 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::open_sqlite_connection;
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> ImportResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| ImportError::ConfigReadError {
            key: key.to_string(),
            message: format!("锁获取失败: {}", e),
        })?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ImportError::ConfigReadError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有 global 配置（用于 CLI 展示）
    pub fn list_global_configs(&self) -> RepositoryResult<HashMap<String, String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }
        Ok(config_map)
    }

    /// 从 config_kv 表读取配置值，带默认值（空白值视为缺失）
    fn get_config_or_default(&self, key: &str, default: &str) -> ImportResult<String> {
        Ok(self
            .get_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

// ==========================================
// ImportConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_default_category_name(&self) -> ImportResult<String> {
        self.get_config_or_default(config_keys::DEFAULT_CATEGORY_NAME, defaults::CATEGORY_NAME)
    }

    async fn get_new_category_color(&self) -> ImportResult<String> {
        self.get_config_or_default(config_keys::NEW_CATEGORY_COLOR, defaults::CATEGORY_COLOR)
    }

    async fn get_new_category_icon(&self) -> ImportResult<String> {
        self.get_config_or_default(config_keys::NEW_CATEGORY_ICON, defaults::CATEGORY_ICON)
    }

    async fn get_default_low_stock_threshold(&self) -> ImportResult<i64> {
        let value = self.get_config_or_default(
            config_keys::DEFAULT_LOW_STOCK_THRESHOLD,
            &defaults::LOW_STOCK_THRESHOLD.to_string(),
        )?;

        match value.parse::<i64>() {
            Ok(v) if v >= 0 => Ok(v),
            _ => {
                tracing::warn!(
                    config_key = config_keys::DEFAULT_LOW_STOCK_THRESHOLD,
                    raw_value = %value,
                    "低库存阈值配置格式错误，使用默认值"
                );
                Ok(defaults::LOW_STOCK_THRESHOLD)
            }
        }
    }
}

// ==========================================
// 内置默认值
// ==========================================
pub mod defaults {
    pub const CATEGORY_NAME: &str = "Uncategorized";
    pub const CATEGORY_COLOR: &str = "#6366f1";
    pub const CATEGORY_ICON: &str = "package";
    pub const LOW_STOCK_THRESHOLD: i64 = 10;
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const DEFAULT_CATEGORY_NAME: &str = "import.default_category_name";
    pub const NEW_CATEGORY_COLOR: &str = "import.new_category_color";
    pub const NEW_CATEGORY_ICON: &str = "import.new_category_icon";
    pub const DEFAULT_LOW_STOCK_THRESHOLD: &str = "import.default_low_stock_threshold";
}
