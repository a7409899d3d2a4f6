// ==========================================
// 商品目录导入 - 配置层
// ==========================================
// 职责: 导入默认值（缺省分类、新分类颜色/图标、低库存阈值）
// 存储: config_kv 表，缺失或格式错误时回退到内置默认值
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::ImportConfigReader;
